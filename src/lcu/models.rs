use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Queue ids worth scoring. Everything else (bot games, events, customs)
/// says nothing about how a player performs in a real lobby.
pub const QUEUE_NORMAL: i32 = 430;
pub const QUEUE_RANKED_SOLO: i32 = 420;
pub const QUEUE_RANKED_FLEX: i32 = 440;
pub const QUEUE_ARAM: i32 = 450;

pub fn is_scorable_queue(queue_id: i32) -> bool {
    matches!(
        queue_id,
        QUEUE_NORMAL | QUEUE_RANKED_SOLO | QUEUE_RANKED_FLEX | QUEUE_ARAM
    )
}

/// Body of the system message the client posts into the champ-select chat
/// room when a member enters it.
pub const JOINED_ROOM_MSG: &str = "joined_room";
pub const CONVERSATION_MSG_TYPE_SYSTEM: &str = "system";
pub const CONVERSATION_TYPE_CHAMP_SELECT: &str = "championSelect";

/// The two fixed team ids in a session object.
pub const TEAM_ONE_ID: i32 = 100;
pub const TEAM_TWO_ID: i32 = 200;

pub const LANE_BOTTOM: &str = "BOTTOM";
pub const ROLE_SUPPORT: &str = "DUO_SUPPORT";

/// Gameflow session phase value while a match is being played.
pub const GAMEFLOW_IN_PROGRESS: &str = "InProgress";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub summoner_id: i64,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
    pub puuid: String,
}

impl Summoner {
    /// Full riot id, `name#tag`.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    #[serde(rename = "type")]
    pub conversation_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMsg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub body: String,
    #[serde(default)]
    pub from_summoner_id: i64,
}

/// Envelope returned by the match-history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchHistory {
    pub games: MatchHistoryPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchHistoryPage {
    pub games: Vec<GameInfo>,
}

/// One entry from a player's match history. The history endpoint only
/// includes the queried player in `participants`, so index 0 carries their
/// stats for the lightweight KDA trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub game_id: i64,
    pub queue_id: i32,
    /// Seconds.
    pub game_duration: i64,
    pub game_creation_date: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Full ten-player record for one match, fetched per game id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: i64,
    #[serde(default)]
    pub queue_id: i32,
    pub game_duration: i64,
    pub game_creation_date: DateTime<Utc>,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub participant_identities: Vec<ParticipantIdentity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentity {
    pub participant_id: i32,
    pub player: IdentityPlayer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPlayer {
    pub summoner_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub participant_id: i32,
    pub team_id: i32,
    pub stats: ParticipantStats,
    #[serde(default)]
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantStats {
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub total_damage_dealt_to_champions: i64,
    pub gold_earned: i64,
    pub vision_score: i64,
    pub total_minions_killed: i32,
    pub penta_kills: i32,
    pub quadra_kills: i32,
    pub triple_kills: i32,
    pub first_blood_kill: bool,
    pub first_blood_assist: bool,
    pub win: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timeline {
    pub lane: String,
    pub role: String,
}

impl Participant {
    pub fn is_support_role(&self) -> bool {
        self.timeline.lane == LANE_BOTTOM && self.timeline.role == ROLE_SUPPORT
    }
}

/// Authoritative session object once a match exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFlowSession {
    pub phase: String,
    pub game_data: GameData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameData {
    pub team_one: Vec<TeamMember>,
    pub team_two: Vec<TeamMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub summoner_id: i64,
}
