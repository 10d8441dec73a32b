//! Client-side error type.

use thiserror::Error;

/// Failure of a remote customer operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error envelope; `message` is shown as is
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Server error code, if the server answered
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            ClientError::Transport(_) => None,
        }
    }

    /// Whether the server rejected the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}
