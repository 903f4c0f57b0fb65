//! Error types for the CCIP gateway
//!
//! Every failure carries an [`ErrorKind`] that decides the HTTP status and
//! the `error` tag of the JSON body returned to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// DNS-wire name could not be decoded
    #[error("Malformed name: {0}")]
    MalformedName(String),

    /// Request rejected before resolution
    #[error("{0}")]
    InvalidRequest(String),

    /// Sub-call recognised but deliberately unsupported
    #[error("{0}")]
    NotImplemented(String),

    /// Name-data store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Signing failure
    #[error("Signing error: {0}")]
    Signing(String),

    /// Startup configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Error kind exposed to clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedName(_) | Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
            Error::Store(_)
            | Error::Signing(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Serialization(_)
            | Error::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// HTTP status for this error
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// JSON body sent to the client.
    ///
    /// Internal failures are reported with a fixed message; the cause stays
    /// in the server log.
    pub fn to_body(&self) -> ErrorBody {
        match self.kind() {
            ErrorKind::InternalError => ErrorBody::internal(),
            kind => ErrorBody::new(kind, self.to_string()),
        }
    }
}

/// Error kinds reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or untrusted request
    InvalidRequest,
    /// Unsupported sub-call
    NotImplemented,
    /// Unknown name
    NotFound,
    /// Anything the caller cannot fix
    InternalError,
}

impl ErrorKind {
    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::InternalError => "InternalError",
        }
    }

    /// HTTP status code
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::InvalidRequest | ErrorKind::NotImplemented => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error kind tag
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorBody {
    /// Build a body from a kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error: kind.as_str().to_string(),
            message: message.into(),
        }
    }

    /// Body for any internal failure
    pub fn internal() -> Self {
        Self::new(ErrorKind::InternalError, INTERNAL_ERROR_MESSAGE)
    }
}
