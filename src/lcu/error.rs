use thiserror::Error;

#[derive(Debug, Error)]
pub enum LcuError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("client returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("push socket error: {0}")]
    Socket(String),

    #[error("failed to decode client payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no champ-select conversation found")]
    NoConversation,
}
