//! Centralized error types for mailcarve.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailcarve library.
///
/// Only [`CarveError::Format`] ever escapes a decomposition: a raw stream
/// that is not a parsable MIME message is fatal to that single message.
/// Storage-write failures are surfaced by [`crate::store::PartStore::save`]
/// and absorbed by the tree walk, which records the affected part without
/// materialized bytes and keeps going.
#[derive(Error, Debug)]
pub enum CarveError {
    /// The top-level stream is not a parsable MIME message.
    #[error("message '{0}' is not a parsable MIME message")]
    Format(String),

    /// The injected destination is not an existing directory.
    #[error("destination is not a directory: {0}")]
    Destination(PathBuf),

    /// A part's bytes could not be written to storage.
    #[error("failed to write part '{name}': {source}")]
    StorageWrite {
        name: String,
        source: std::io::Error,
    },
}

/// Convenience alias for `Result<T, CarveError>`.
pub type Result<T> = std::result::Result<T, CarveError>;
