pub mod config;
pub mod lcu;
pub mod score;
pub mod scout;

pub use config::{AppConfig, ConfigError};
pub use lcu::{LcuApi, LcuError, PushEvent, RestClient};
pub use score::{ScoreBreakdown, ScoreEngine, ScoreError, ScoringConfig, Tier, DEFAULT_SCORE};
pub use scout::{Aggregator, Delivery, GamePhase, Monitor, PlayerScore, RosterResolver};
