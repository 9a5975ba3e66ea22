use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MirrorError {
    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Session is not complete")]
    SessionIncomplete,
}

impl From<serde_json::Error> for MirrorError {
    fn from(e: serde_json::Error) -> Self {
        MirrorError::Serialization(e.to_string())
    }
}
