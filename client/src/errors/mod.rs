//! Global client error types.
//!
//! This module defines the error taxonomy shared across the session, routing,
//! chat, and API layers, with helper constructors for consistent construction
//! at call sites.

use thiserror::Error;

/// Errors surfaced by the PawHaven client subsystem.
///
/// Token problems (`Decode`, `ExpiredToken`) are recovered locally by treating
/// the session as logged out; they are never allowed to escape as panics.
/// `Api` carries the server's `message` field verbatim so hosts can show it
/// to the user unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Token decode error: {message}")]
    Decode { message: String },

    #[error("Session expired")]
    ExpiredToken,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Unexpected response shape: {message}")]
    UnexpectedResponse { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: anyhow::Error,
    },

    #[error("Config error: {message}")]
    Config { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    // Helper constructors for common patterns

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the server rejected our credentials; the session reacts to
    /// this with a forced logout.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}
