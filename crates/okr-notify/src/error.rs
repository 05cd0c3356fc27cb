// error.rs — Error types for the notification subsystem.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while delivering a context message to a sink.
///
/// Delivery failures are non-fatal: the store logs them and the mutation
/// that triggered the notification still stands.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the snapshot or message.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
