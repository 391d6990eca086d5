//! Error types
//!
//! Nothing here ever reaches gameplay: the session logs these and falls back
//! to defaults.

/// Failures of the key-value store behind best score, settings and word lists.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("read failed: {0}")]
    Read(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("stored value is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Invalid balance configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}
