use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::{
    api::LcuApi,
    error::LcuError,
    models::{
        Conversation, ConversationMsg, GameFlowSession, GameSummary, MatchHistory, Summoner,
        CONVERSATION_TYPE_CHAMP_SELECT,
    },
};
use async_trait::async_trait;

/// REST client for the local game client.
///
/// The client serves https on loopback with a self-signed certificate and
/// `riot:{token}` basic auth, so certificate validation is disabled here.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new(port: u16, token: &str) -> Result<Self, LcuError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("https://127.0.0.1:{port}"),
            token: token.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LcuError> {
        debug!(path, "lcu get");
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth("riot", Some(&self.token))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(LcuError::Status(resp.status()));
        }
        Ok(resp.json::<T>().await?)
    }

    async fn post_json(&self, path: &str, body: Option<serde_json::Value>) -> Result<(), LcuError> {
        debug!(path, "lcu post");
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .basic_auth("riot", Some(&self.token));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(LcuError::Status(resp.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl LcuApi for RestClient {
    async fn current_summoner(&self) -> Result<Summoner, LcuError> {
        self.get_json("/lol-summoner/v1/current-summoner").await
    }

    async fn list_summoners(&self, ids: &[i64]) -> Result<Vec<Summoner>, LcuError> {
        let ids_param = serde_json::to_string(ids)?;
        self.get_json(&format!("/lol-summoner/v2/summoners?ids={ids_param}"))
            .await
    }

    async fn list_games(
        &self,
        puuid: &str,
        beg_index: usize,
        end_index: usize,
    ) -> Result<MatchHistory, LcuError> {
        self.get_json(&format!(
            "/lol-match-history/v1/products/lol/{puuid}/matches?begIndex={beg_index}&endIndex={end_index}"
        ))
        .await
    }

    async fn game_summary(&self, game_id: i64) -> Result<GameSummary, LcuError> {
        self.get_json(&format!("/lol-match-history/v1/games/{game_id}"))
            .await
    }

    async fn gameflow_session(&self) -> Result<GameFlowSession, LcuError> {
        self.get_json("/lol-gameflow/v1/session").await
    }

    async fn current_conversation_id(&self) -> Result<String, LcuError> {
        let conversations: Vec<Conversation> = self.get_json("/lol-chat/v1/conversations").await?;
        conversations
            .into_iter()
            .find(|c| c.conversation_type == CONVERSATION_TYPE_CHAMP_SELECT)
            .map(|c| c.id)
            .ok_or(LcuError::NoConversation)
    }

    async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationMsg>, LcuError> {
        self.get_json(&format!("/lol-chat/v1/conversations/{conversation_id}/messages"))
            .await
    }

    async fn send_conversation_message(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<(), LcuError> {
        self.post_json(
            &format!("/lol-chat/v1/conversations/{conversation_id}/messages"),
            Some(json!({ "body": body, "type": "chat" })),
        )
        .await
    }

    async fn accept_ready_check(&self) -> Result<(), LcuError> {
        self.post_json("/lol-matchmaking/v1/ready-check/accept", None)
            .await
    }
}
