use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Scan errors
    #[error("Invalid card read: {0}")]
    InvalidRead(String),

    #[error("Invalid canonical identifier: {0}")]
    InvalidUidFormat(String),

    // Directory errors
    #[error("Duplicate directory entry for identifier {uid}")]
    DuplicateEntry { uid: String },

    // Display errors
    #[error("Display unavailable: {0}")]
    DisplayUnavailable(String),

    // Serialization errors
    #[error("Payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
