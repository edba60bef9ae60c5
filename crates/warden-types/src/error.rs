//! Error types shared across warden crates.
//!
//! Pipeline-stage failures (dispatch, audit) live next to their stages in
//! `warden-core`; this type covers configuration and generic I/O.

use thiserror::Error;

/// Top-level error type for warden.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WardenError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A config file was named explicitly but does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WardenError>;
