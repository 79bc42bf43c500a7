use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
