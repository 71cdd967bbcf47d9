//! Error types for the Azur Lane API client.
//!
//! # Design
//! Three failure classes reach the caller unchanged, none retried:
//! the request never got an answer (`Transport`), the server answered with
//! something other than 200 (`UnexpectedStatus`, raw body kept for API-specific
//! error payloads), or a 200 body did not decode (`Decode`). The envelope's own
//! status fields are never consulted, so an API-level "not found" delivered
//! with HTTP 200 is a successful, zero-valued result.

use std::fmt;

use thiserror::Error;

/// Why a request failed before a response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The configured timeout elapsed.
    Timeout,
    /// DNS, connect, TLS, or I/O failure.
    Network,
    /// The server answered but the body exceeded the read limit.
    BodyTooLarge,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "request timed out"),
            TransportErrorKind::Network => write!(f, "network error"),
            TransportErrorKind::BodyTooLarge => write!(f, "response body too large"),
        }
    }
}

/// A request that did not produce an HTTP response.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Network,
            message: message.into(),
        }
    }

    pub fn body_too_large(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::BodyTooLarge,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

/// Errors returned by `AzurLaneClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200.
    #[error("expected status 200, got {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: u16, body: Vec<u8> },

    /// A 200 response body could not be decoded into the expected envelope.
    #[error("decoding response failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Raw response body of an `UnexpectedStatus` error, lossily decoded.
    pub fn body_text(&self) -> Option<String> {
        match self {
            ApiError::UnexpectedStatus { body, .. } => {
                Some(String::from_utf8_lossy(body).into_owned())
            }
            _ => None,
        }
    }
}

/// Invalid configuration read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
