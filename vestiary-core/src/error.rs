#[derive(Debug, thiserror::Error)]
pub enum VestiaryError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VestiaryError>;
