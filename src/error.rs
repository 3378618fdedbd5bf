//! Error handling and custom error types
//!
//! Two layers: [`Error`] carries the low-level transport/parse detail used
//! inside the crate, and [`GatewayError`] is the normalized failure that the
//! gateway hands to views. Raw transport errors never cross the gateway.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Category of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Required configuration is missing; nothing can be served.
    Config,
    /// The request was rejected before dispatch.
    InvalidInput,
    /// The backend call failed (network, auth, rate limit, timeout, backend fault).
    Transport,
    /// A structured response did not parse as JSON.
    Format,
    /// A parsed structured response violated the quiz invariants.
    Validation,
}

/// Normalized failure shown to the learner verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    kind: GatewayErrorKind,
    message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Config, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidInput, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Transport, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Format, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Validation, message)
    }

    pub fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub const TRANSPORT_FAILED: &str = "Failed to reach the AI. Please try again.";

impl From<Error> for GatewayError {
    fn from(err: Error) -> Self {
        match err {
            Error::Config(msg) => GatewayError::config(msg),
            other => {
                tracing::error!("Backend failure: {}", other);
                GatewayError::transport(TRANSPORT_FAILED)
            }
        }
    }
}
