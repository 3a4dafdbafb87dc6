//! Document normalization and validation
//!
//! ## Rules, per declared field
//!
//! ```text
//! absent          -> "required field" when required, otherwise skipped
//! null            -> passes when nullable, else "required field" / "null value not allowed"
//! wrong type      -> "must be of {tag} type" (remaining rules skipped)
//! regex           -> strings must match the whole pattern
//! allowed         -> value must be listed
//! min / max       -> inclusive bounds on comparable values
//! min/max_length  -> strings (chars), bytes and containers
//! items           -> each container element checked recursively
//! ```
//!
//! Keys present in the document but absent from the schema are reported as
//! "unknown field". Normalization only injects defaults; it never coerces.

use crate::error::FieldErrors;
use crate::fragment::{Document, Fragment, Schema};
use crate::registry;
use kvmodel_core::Value;
use std::cmp::Ordering;

/// Validator bound to one schema
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    schema: &'a Schema,
}

impl<'a> Validator<'a> {
    /// Validator over `schema`
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Copy of `doc` with defaults injected for absent fields
    ///
    /// A field counts as absent when it is missing or null and its fragment
    /// is not nullable.
    pub fn normalized(&self, doc: &Document) -> Document {
        let mut out = doc.clone();
        for (name, fragment) in self.schema.iter() {
            let Some(default) = &fragment.default else {
                continue;
            };
            let absent = match out.get(name) {
                None => true,
                Some(Value::Null) => !fragment.nullable,
                Some(_) => false,
            };
            if absent {
                out.insert(name.to_string(), default.resolve());
            }
        }
        out
    }

    /// Check `doc` against the schema
    ///
    /// # Errors
    ///
    /// Every failing field with its messages.
    pub fn validate(&self, doc: &Document) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for name in doc.keys() {
            if !self.schema.contains(name) {
                errors.add(name.clone(), "unknown field");
            }
        }

        for (name, fragment) in self.schema.iter() {
            match doc.get(name) {
                None => {
                    if fragment.required {
                        errors.add(name, "required field");
                    }
                }
                Some(Value::Null) => {
                    if !fragment.nullable {
                        let message = if fragment.required {
                            "required field"
                        } else {
                            "null value not allowed"
                        };
                        errors.add(name, message);
                    }
                }
                Some(value) => {
                    for message in check_value(fragment, value) {
                        errors.add(name, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Normalize then validate, returning the normalized document
    pub fn check(&self, doc: &Document) -> Result<Document, FieldErrors> {
        let normalized = self.normalized(doc);
        self.validate(&normalized)?;
        Ok(normalized)
    }
}

fn check_value(fragment: &Fragment, value: &Value) -> Vec<String> {
    let mut messages = Vec::new();

    match registry::check(&fragment.type_tag, value) {
        None => {
            messages.push(format!("unknown type '{}'", fragment.type_tag));
            return messages;
        }
        Some(false) => {
            messages.push(format!("must be of {} type", fragment.type_tag));
            return messages;
        }
        Some(true) => {}
    }

    if let (Some(pattern), Value::String(s)) = (&fragment.regex, value) {
        if !pattern.is_match(s) {
            messages.push(format!("value does not match regex '{}'", pattern.as_str()));
        }
    }

    if let Some(allowed) = &fragment.allowed {
        if !allowed.contains(value) {
            messages.push(format!("unallowed value {}", value));
        }
    }

    if let Some(min) = &fragment.min {
        if compare(value, min) == Some(Ordering::Less) {
            messages.push(format!("min value is {}", min));
        }
    }
    if let Some(max) = &fragment.max {
        if compare(value, max) == Some(Ordering::Greater) {
            messages.push(format!("max value is {}", max));
        }
    }

    if let Some(len) = length(value) {
        if let Some(min) = fragment.min_length {
            if len < min {
                messages.push(format!("min length is {}", min));
            }
        }
        if let Some(max) = fragment.max_length {
            if len > max {
                messages.push(format!("max length is {}", max));
            }
        }
    }

    if let (Some(items), Some(elements)) = (&fragment.items, value.as_elements()) {
        for (index, element) in elements.iter().enumerate() {
            if element.is_null() {
                messages.push(format!("item {}: null value not allowed", index));
                continue;
            }
            for message in check_value(items, element) {
                messages.push(format!("item {}: {}", index, message));
            }
        }
    }

    messages
}

/// Ordering between comparable values; `None` for mismatched kinds
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Bytes(b) => Some(b.len()),
        Value::List(items) | Value::Set(items) => Some(items.len()),
        _ => None,
    }
}
