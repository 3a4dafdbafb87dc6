//! Schema error types

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Invalid constraint supplied while building a fragment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The regex constraint does not compile
    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex {
        /// Pattern as written
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// A type tag was registered with an empty name
    #[error("type tag must not be empty")]
    EmptyTag,
}

/// Result type for schema construction
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Validation failures keyed by field name
///
/// Each field maps to one or more human-readable messages. Fields iterate
/// in name order so error output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// True when no field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// True when the field has at least one message
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Failing field names in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate `(field, messages)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}
