//! Schema fragments
//!
//! A [`Fragment`] is the validation contract of one field: a type tag plus
//! optional constraints. A [`Schema`] is an ordered table of fragments keyed
//! by field name.

use crate::error::{SchemaError, SchemaResult};
use chrono::Utc;
use kvmodel_core::Value;
use regex::Regex;
use std::collections::BTreeMap;

/// Document checked against a schema: field name → value
pub type Document = BTreeMap<String, Value>;

// ============================================================================
// Defaults
// ============================================================================

/// Value injected by normalization when a field is absent
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A fixed value
    Value(Value),
    /// Current UTC timestamp, evaluated at normalization time
    UtcNow,
    /// Current UTC date, evaluated at normalization time
    Today,
}

impl DefaultValue {
    /// Produce the value to inject
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Value(v) => v.clone(),
            DefaultValue::UtcNow => Value::DateTime(Utc::now().naive_utc()),
            DefaultValue::Today => Value::Date(Utc::now().date_naive()),
        }
    }
}

// ============================================================================
// Fragment
// ============================================================================

/// A compiled regex constraint, anchored to the whole value
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Regex,
}

impl Pattern {
    /// Compile `source` so that it must match the entire string
    pub fn new(source: &str) -> SchemaResult<Self> {
        let compiled =
            Regex::new(&format!("^(?:{})$", source)).map_err(|e| SchemaError::InvalidRegex {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// Pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Full-string match
    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

/// Validation contract of one field
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Type tag resolved through [`crate::registry`]
    pub type_tag: String,
    /// Must be present and non-null
    pub required: bool,
    /// An explicit null passes validation
    pub nullable: bool,
    /// Strings must match
    pub regex: Option<Pattern>,
    /// Injected by normalization when absent
    pub default: Option<DefaultValue>,
    /// Whitelist of accepted values
    pub allowed: Option<Vec<Value>>,
    /// Inclusive lower bound
    pub min: Option<Value>,
    /// Inclusive upper bound
    pub max: Option<Value>,
    /// Minimum length of strings, bytes or containers
    pub min_length: Option<usize>,
    /// Maximum length of strings, bytes or containers
    pub max_length: Option<usize>,
    /// Contract of each element of a container
    pub items: Option<Box<Fragment>>,
}

impl Fragment {
    /// Fragment with only a type tag
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            required: false,
            nullable: false,
            regex: None,
            default: None,
            allowed: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            items: None,
        }
    }

    /// Mark the field required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept explicit nulls
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Add a regex constraint
    ///
    /// # Errors
    ///
    /// [`SchemaError::InvalidRegex`] when the pattern does not compile.
    pub fn regex(mut self, pattern: &str) -> SchemaResult<Self> {
        self.regex = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Inject `default` when the field is absent
    pub fn default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Inject a fixed value when the field is absent
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.default(DefaultValue::Value(value.into()))
    }

    /// Accept only the listed values
    pub fn allowed(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.allowed = Some(values.into_iter().collect());
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Minimum length
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Maximum length
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Contract for every container element
    pub fn items(mut self, items: Fragment) -> Self {
        self.items = Some(Box::new(items));
        self
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered table of field fragments
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Fragment)>,
}

impl Schema {
    /// Empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field's fragment, keeping its position
    pub fn insert(&mut self, name: impl Into<String>, fragment: Fragment) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = fragment,
            None => self.fields.push((name, fragment)),
        }
    }

    /// Fragment for a field
    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// True when the field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sub-schema holding only the named fields; unknown names are ignored
    pub fn restrict<S: AsRef<str>>(&self, names: &[S]) -> Schema {
        Schema {
            fields: self
                .fields
                .iter()
                .filter(|(n, _)| names.iter().any(|want| want.as_ref() == n))
                .cloned()
                .collect(),
        }
    }

    /// Iterate `(name, fragment)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
