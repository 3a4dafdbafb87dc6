//! Unified error types for kvmodel.
//!
//! This module provides the error type every public operation returns.
//! Errors from the lower crates (store, pipeline, schema, conversion) are
//! folded into it so callers match on one enum.

use kvmodel_core::ConvertError;
use kvmodel_pipeline::PipelineError;
use kvmodel_schema::{FieldErrors, SchemaError};
use kvmodel_storage::StoreError;
use thiserror::Error;

/// All kvmodel errors.
///
/// This is the canonical error type for all kvmodel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Model or field declared incorrectly (missing or duplicate primary
    /// key, nested container, invalid constraint, abstract model used for
    /// persistence)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Record data failed schema validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The primary key has no value, so no storage key can be derived
    #[error("{model} has no primary key value")]
    MissingPrimaryKey {
        /// Model name
        model: String,
    },

    /// A command inside an executed batch failed
    #[error("store command {command} at position {position} failed: {message}")]
    StoreCommand {
        /// Position of the failing command in its batch
        position: usize,
        /// Command name
        command: &'static str,
        /// Store message
        message: String,
    },

    /// The round trip itself failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A field value could not be converted to or from its wire form
    #[error("cannot convert field '{field}': {source}")]
    Conversion {
        /// Field name
        field: String,
        /// Underlying conversion failure
        #[source]
        source: ConvertError,
    },

    /// The model declares no field with this name
    #[error("{model} has no field '{field}'")]
    UnknownField {
        /// Model name
        model: String,
        /// Requested field
        field: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for kvmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the primary key was missing.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self, Error::MissingPrimaryKey { .. })
    }

    /// Check if the store reported an error, either for one command or for
    /// the whole round trip.
    pub fn is_store(&self) -> bool {
        matches!(self, Error::StoreCommand { .. } | Error::Store(_))
    }

    /// Check if this is a conversion error.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion { .. })
    }

    /// Check if this is an unknown-field error.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Error::UnknownField { .. })
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }

    /// Per-field messages of a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub(crate) fn conversion(field: &str, source: ConvertError) -> Self {
        Error::Conversion {
            field: field.to_string(),
            source,
        }
    }
}

// Convert from pipeline errors
impl From<PipelineError> for Error {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Store(err) => Error::Store(err),
            PipelineError::Command {
                position,
                command,
                message,
            } => Error::StoreCommand {
                position,
                command,
                message,
            },
            other => Error::Internal(other.to_string()),
        }
    }
}

// Invalid constraints surface while a model registers
impl From<SchemaError> for Error {
    fn from(e: SchemaError) -> Self {
        Error::Configuration(e.to_string())
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors)
    }
}
