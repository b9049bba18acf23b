pub mod aggregate;
pub mod history;
pub mod monitor;
pub mod report;
pub mod retry;
pub mod roster;
pub mod state;

pub use aggregate::{Aggregator, PlayerScore, KDA_TRAIL_LEN};
pub use history::{HISTORY_WINDOW, MIN_GAME_DURATION_SECS};
pub use monitor::Monitor;
pub use report::{ConversationDelivery, Delivery, LogDelivery};
pub use roster::{split_session_teams, RosterResolver, ROSTER_SIZE};
pub use state::GamePhase;
