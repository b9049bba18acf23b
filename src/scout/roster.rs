use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::lcu::{
    ConversationMsg, GameFlowSession, LcuApi, CONVERSATION_MSG_TYPE_SYSTEM, JOINED_ROOM_MSG,
    TEAM_ONE_ID, TEAM_TWO_ID,
};

/// Players per side.
pub const ROSTER_SIZE: usize = 5;

const CHAT_POLL_ATTEMPTS: u32 = 3;
const CHAT_POLL_DELAY: Duration = Duration::from_secs(1);

/// Resolves who to score: the friendly roster from champ-select chat
/// membership, the enemy roster from the authoritative session object.
pub struct RosterResolver {
    api: Arc<dyn LcuApi>,
}

impl RosterResolver {
    pub fn new(api: Arc<dyn LcuApi>) -> Self {
        Self { api }
    }

    /// Friendly roster during champ select.
    ///
    /// Polls the chat room up to three times, a second apart, waiting for
    /// all five members to join; slow clients sometimes take a while to
    /// enter the room. Returns the final observation either way, or `None`
    /// if the conversation never resolved.
    pub async fn friendly_roster(&self) -> Option<(String, Vec<i64>)> {
        let mut observed: Option<(String, Vec<i64>)> = None;
        for attempt in 1..=CHAT_POLL_ATTEMPTS {
            sleep(CHAT_POLL_DELAY).await;
            match self.observe_chat().await {
                Ok((conversation_id, members)) => {
                    let complete = members.len() == ROSTER_SIZE;
                    observed = Some((conversation_id, members));
                    if complete {
                        break;
                    }
                    debug!(attempt, "chat room not full yet");
                }
                Err(e) => warn!(attempt, error = %e, "chat room lookup failed"),
            }
        }
        observed
    }

    async fn observe_chat(&self) -> Result<(String, Vec<i64>), crate::lcu::LcuError> {
        let conversation_id = self.api.current_conversation_id().await?;
        let messages = self.api.conversation_messages(&conversation_id).await?;
        Ok((conversation_id, members_from_messages(&messages)))
    }
}

/// Member ids from the chat room's "joined room" system messages. Sender
/// ids at or below zero are not real members.
pub fn members_from_messages(messages: &[ConversationMsg]) -> Vec<i64> {
    messages
        .iter()
        .filter(|m| {
            m.msg_type == CONVERSATION_MSG_TYPE_SYSTEM
                && m.body == JOINED_ROOM_MSG
                && m.from_summoner_id > 0
        })
        .map(|m| m.from_summoner_id)
        .collect()
}

/// Splits the session's two teams into (self roster, enemy roster) around
/// `self_id`.
///
/// If the self id is in neither team, or any member id in either team is
/// invalid, both rosters come back empty: an incomplete session object
/// cannot be trusted for a partial team.
pub fn split_session_teams(self_id: i64, session: &GameFlowSession) -> (Vec<i64>, Vec<i64>) {
    let team_one: Vec<i64> = session
        .game_data
        .team_one
        .iter()
        .map(|m| m.summoner_id)
        .collect();
    let team_two: Vec<i64> = session
        .game_data
        .team_two
        .iter()
        .map(|m| m.summoner_id)
        .collect();

    if team_one.iter().chain(team_two.iter()).any(|&id| id <= 0) {
        return (Vec::new(), Vec::new());
    }

    let self_team = if team_one.contains(&self_id) {
        TEAM_ONE_ID
    } else if team_two.contains(&self_id) {
        TEAM_TWO_ID
    } else {
        return (Vec::new(), Vec::new());
    };

    if self_team == TEAM_ONE_ID {
        (team_one, team_two)
    } else {
        (team_two, team_one)
    }
}
