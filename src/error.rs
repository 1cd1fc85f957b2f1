// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed, or a success body could not be decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Server { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(err) => err.status(),
            ClientError::Server { status, .. } => Some(*status),
        }
    }
}
