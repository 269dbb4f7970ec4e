//! Error types for Flowcast
//!
//! Uses `thiserror` for library errors. The projection engine itself never
//! returns errors - incomplete input degrades to empty schedules. Errors
//! exist only at the collaborator boundary (snapshot files, config, export).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Flowcast operations
pub type FlowcastResult<T> = Result<T, FlowcastError>;

/// Main error type for Flowcast operations
#[derive(Error, Debug)]
pub enum FlowcastError {
    /// Portfolio snapshot file does not exist
    #[error("portfolio snapshot not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Portfolio snapshot could not be parsed
    #[error("invalid portfolio snapshot {path}: {message}")]
    InvalidSnapshot { path: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// A date argument was not in YYYY-MM-DD form
    #[error("invalid date '{value}' - expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
