//! Store error types

use thiserror::Error;

/// Errors raised by a [`crate::Store`]
///
/// Round-trip level failures (the whole batch was refused or never
/// reached the store) and single-command failures surfaced by the
/// provided helper methods share this type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Batch longer than the configured limit
    #[error("batch of {len} commands exceeds limit of {max}")]
    BatchTooLarge {
        /// Commands in the rejected batch
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Transaction batch sent to a store with transactions disabled
    #[error("transactions are disabled for this store")]
    TransactionsDisabled,

    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A single command failed
    #[error("{command} failed: {message}")]
    Command {
        /// Command name
        command: &'static str,
        /// Store-provided message
        message: String,
    },

    /// Reply shape did not match the command
    #[error("unexpected {actual} reply to {command}")]
    UnexpectedReply {
        /// Command name
        command: &'static str,
        /// Reply kind received
        actual: &'static str,
    },

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
