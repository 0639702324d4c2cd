// ============================================================================
// ERRORS - Typed failures for services
// ============================================================================
// DOM code keeps `Result<_, JsValue>`; these cover remote calls and storage.
// ============================================================================

use thiserror::Error;

/// Failure talking to the remote pin collection
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PinStoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("insert returned no row")]
    EmptyInsert,

    #[error("invalid pin row: {0}")]
    InvalidRow(String),
}

/// Failure resolving a free-text location
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("empty search query")]
    EmptyQuery,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no location found for '{0}'")]
    NoMatch(String),
}

/// Failure reading or writing client-local storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write key '{0}'")]
    Write(String),
}
