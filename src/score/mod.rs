pub mod breakdown;
pub mod config;
pub mod engine;
pub mod tier;

mod errors;

pub use breakdown::{ScoreBreakdown, ScoreReason, DEFAULT_SCORE};
pub use config::{RateTier, ScoringConfig};
pub use engine::ScoreEngine;
pub use errors::ScoreError;
pub use tier::Tier;
