use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Failed to load knowledge base from {origin}: {reason}")]
    LoadFailure { origin: String, reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MatchError {
    pub fn load_failure(origin: impl Into<String>, reason: impl ToString) -> Self {
        MatchError::LoadFailure {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
