use async_trait::async_trait;

use super::{
    error::LcuError,
    models::{ConversationMsg, GameFlowSession, GameSummary, MatchHistory, Summoner},
};

/// Request/response surface of the local game client.
///
/// The scouting core only talks to the client through this trait so tests
/// can substitute a scripted implementation.
#[async_trait]
pub trait LcuApi: Send + Sync {
    /// The summoner the client is logged in as.
    async fn current_summoner(&self) -> Result<Summoner, LcuError>;

    /// Batch lookup of summoners by id.
    async fn list_summoners(&self, ids: &[i64]) -> Result<Vec<Summoner>, LcuError>;

    /// A page of a player's match history, newest first.
    async fn list_games(
        &self,
        puuid: &str,
        beg_index: usize,
        end_index: usize,
    ) -> Result<MatchHistory, LcuError>;

    /// The full ten-player record for one match.
    async fn game_summary(&self, game_id: i64) -> Result<GameSummary, LcuError>;

    /// The authoritative session object for the current match.
    async fn gameflow_session(&self) -> Result<GameFlowSession, LcuError>;

    /// Id of the champ-select chat conversation, if one is open.
    async fn current_conversation_id(&self) -> Result<String, LcuError>;

    async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationMsg>, LcuError>;

    async fn send_conversation_message(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<(), LcuError>;

    /// Accept the ready check for a found match.
    async fn accept_ready_check(&self) -> Result<(), LcuError>;
}
