use thiserror::Error;

/// Match-level scoring failures. The caller skips the match (or the
/// player's aggregation) and continues; these never abort a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("summoner {0} is not in the match participant list")]
    ParticipantNotFound(i64),

    #[error("team for summoner {0} could not be determined")]
    TeamNotFound(i64),
}
