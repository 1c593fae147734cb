//! Error handling for the api module

use super::ApiResponse;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The backend answered 401; the session has been invalidated.
    #[error("Session expired or unauthorized")]
    Unauthorized,

    /// The backend rejected a request body (400/422).
    #[error("Rejected by the server: {message}")]
    Validation { message: String },

    /// Any other non-2xx status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decode(String),
}

/// `{ "error": "<message>" }`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl ApiError {
    /// The envelope's message, else the trimmed body, else the status.
    pub fn message_of(response: &ApiResponse) -> String {
        match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => envelope.error,
            Err(_) => {
                let text = String::from_utf8_lossy(&response.body).trim().to_string();
                if text.is_empty() {
                    format!("status {}", response.status)
                } else {
                    text
                }
            }
        }
    }

    /// Builds an error from a non-2xx response, preferring the envelope's message.
    pub fn from_response(response: &ApiResponse) -> ApiError {
        let status = response.status;
        let message = Self::message_of(response);

        match status {
            401 => ApiError::Unauthorized,
            400 | 422 => ApiError::Validation { message },
            _ => ApiError::Http { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Validation { .. } => None,
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
