//! Conversion error types
//!
//! Raised when a value cannot be turned into its wire form or when bytes
//! read back from the store do not parse as the declared type.

use thiserror::Error;

/// Failure converting between a [`crate::Value`] and its wire form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The value kind does not match the converter
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Kind the converter accepts
        expected: &'static str,
        /// Kind that was supplied
        actual: &'static str,
    },

    /// Wire bytes could not be decoded
    #[error("malformed {tag} value: {message}")]
    Malformed {
        /// Type tag of the converter
        tag: &'static str,
        /// Parser message
        message: String,
    },

    /// A scalar wire value was expected but a container came back, or vice versa
    #[error("wire shape mismatch: expected {expected}")]
    Shape {
        /// Expected wire shape
        expected: &'static str,
    },
}

impl ConvertError {
    /// Build a `Malformed` error from any displayable parser error
    pub fn malformed(tag: &'static str, err: impl std::fmt::Display) -> Self {
        ConvertError::Malformed {
            tag,
            message: err.to_string(),
        }
    }
}

/// Result type for conversions
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
