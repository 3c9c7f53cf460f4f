use thiserror::Error;

/// Error type for the fallible edges of the engine. The calculation paths
/// are total and never produce these; only record ingestion and window
/// construction can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
