use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameLogError {
    #[error("Stored log for key {key} is malformed: {reason}")]
    MalformedStorage { key: String, reason: String },

    #[error("No game ID available: {0}")]
    InvalidGameId(String),

    #[error("Active tab unavailable: {0}")]
    TabUnavailable(String),

    #[error("A log entry is required")]
    EmptyInput,

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GameLogError {
    /// True when the error means the popup is not looking at a game page.
    pub fn is_wrong_context(&self) -> bool {
        matches!(
            self,
            GameLogError::InvalidGameId(_) | GameLogError::TabUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameLogError>;
