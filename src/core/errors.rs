use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Invalid CSV data received: empty response")]
    EmptyResponse,

    #[error("{0}")]
    NotEnoughRows(&'static str),

    #[error("{0}")]
    NoProfiles(&'static str),

    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded { key: String, needed: usize, available: usize },

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("{0}")]
    Custom(String),
}

impl From<std::io::Error> for ProfileError {
    fn from(error: std::io::Error) -> Self {
        ProfileError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ProfileError {
    fn from(error: reqwest::Error) -> Self {
        ProfileError::Reqwest(Box::new(error))
    }
}
