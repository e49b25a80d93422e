use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Snapshot fetch failed: {0}")]
    Snapshot(String),

    #[error("History fetch failed for {code}: {reason}")]
    History { code: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
