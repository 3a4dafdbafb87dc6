//! Pipeline error types

use kvmodel_storage::StoreError;
use thiserror::Error;

/// Errors raised while executing a pipeline or reading its results
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The round trip itself failed; no result was resolved
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A queued command failed; results before `position` are resolved,
    /// this one and every later one are not
    #[error("command {position} ({command}) failed: {message}")]
    Command {
        /// Zero-based position in issuance order
        position: usize,
        /// Command name
        command: &'static str,
        /// Store-provided message
        message: String,
    },

    /// Deferred result read before its pipeline executed
    #[error("deferred result read before its pipeline executed")]
    Unresolved,

    /// The reply does not have the shape the command promised
    #[error("unexpected {actual} reply, expected {expected}")]
    UnexpectedReply {
        /// Reply kind the deferred decodes
        expected: &'static str,
        /// Reply kind received
        actual: &'static str,
    },

    /// The store answered with a different number of replies than commands sent
    #[error("store returned {replies} replies for {commands} commands")]
    ReplyCountMismatch {
        /// Commands sent
        commands: usize,
        /// Replies received
        replies: usize,
    },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
