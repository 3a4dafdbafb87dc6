//! Field descriptors
//!
//! A [`Field`] binds a converter to a named attribute of a model. Fields are
//! declared with a small builder, then bound to their owning model when the
//! model registers. Binding fixes the owner name and compiles the field's
//! schema fragment.
//!
//! # Example
//!
//! ```ignore
//! let id = Field::new("id", Text).primary_key();
//! let email = Field::new("email", EmailAddress).required();
//! let age = Field::new("age", Integer).min(0).max(150);
//! let created = Field::new("created", DateTime).default(DefaultValue::UtcNow);
//! ```

use crate::error::{Error, Result};
use crate::types::{FieldType, PendingLoad};
use kvmodel_core::{aux_key, Value};
use kvmodel_pipeline::Pipeline;
use kvmodel_schema::{DefaultValue, Document, Fragment};
use std::fmt;
use std::sync::Arc;

/// Extra constraints layered over the converter's own fragment
#[derive(Debug, Clone, Default)]
struct Constraints {
    required: bool,
    nullable: bool,
    regex: Option<String>,
    default: Option<DefaultValue>,
    allowed: Option<Vec<Value>>,
    min: Option<Value>,
    max: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

/// A named, typed attribute of a model
#[derive(Clone)]
pub struct Field {
    name: String,
    owner: String,
    ty: Arc<dyn FieldType>,
    primary_key: bool,
    constraints: Constraints,
    fragment: Fragment,
}

impl Field {
    /// Field `name` converted by `ty`
    pub fn new(name: impl Into<String>, ty: impl FieldType + 'static) -> Self {
        Self::with_type(name, Arc::new(ty))
    }

    /// Field sharing an existing converter
    pub fn with_type(name: impl Into<String>, ty: Arc<dyn FieldType>) -> Self {
        let fragment = Fragment::new(ty.tag());
        Self {
            name: name.into(),
            owner: String::new(),
            ty,
            primary_key: false,
            constraints: Constraints::default(),
            fragment,
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Mark as the primary key; implies `required`
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Must be set before saving
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Accept explicit nulls during validation
    pub fn nullable(mut self) -> Self {
        self.constraints.nullable = true;
        self
    }

    /// String values must match `pattern` in full; compiled at registration
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.regex = Some(pattern.into());
        self
    }

    /// Value injected when the field is unset at save time
    pub fn default(mut self, default: DefaultValue) -> Self {
        self.constraints.default = Some(default);
        self
    }

    /// Fixed value injected when the field is unset at save time
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.default(DefaultValue::Value(value.into()))
    }

    /// Accept only these values
    pub fn allowed(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.constraints.allowed = Some(values.into_iter().collect());
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.constraints.min = Some(min.into());
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.constraints.max = Some(max.into());
        self
    }

    /// Minimum length of strings, bytes or containers
    pub fn min_length(mut self, len: usize) -> Self {
        self.constraints.min_length = Some(len);
        self
    }

    /// Maximum length of strings, bytes or containers
    pub fn max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    /// Attach to `owner` and compile the schema fragment
    pub(crate) fn bind(&mut self, owner: &str) -> Result<()> {
        let c = &self.constraints;
        let mut fragment = self.ty.schema()?;
        if let Some(pattern) = &c.regex {
            fragment = fragment.regex(pattern)?;
        }
        fragment.required = fragment.required || c.required || self.primary_key;
        fragment.nullable = fragment.nullable || c.nullable;
        if let Some(default) = &c.default {
            fragment.default = Some(default.clone());
        }
        if let Some(allowed) = &c.allowed {
            fragment.allowed = Some(allowed.clone());
        }
        if c.min.is_some() {
            fragment.min = c.min.clone();
        }
        if c.max.is_some() {
            fragment.max = c.max.clone();
        }
        if c.min_length.is_some() {
            fragment.min_length = c.min_length;
        }
        if c.max_length.is_some() {
            fragment.max_length = c.max_length;
        }

        self.owner = owner.to_string();
        self.fragment = fragment;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning model; empty until the model registers
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Converter
    pub fn field_type(&self) -> &dyn FieldType {
        self.ty.as_ref()
    }

    /// True for the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// True for list and set fields
    pub fn is_container(&self) -> bool {
        self.ty.is_container()
    }

    /// Validation fragment (converter contract plus field constraints)
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Auxiliary key holding this field's elements under `record_key`
    pub fn aux_key(&self, record_key: &str) -> String {
        aux_key(record_key, &self.name)
    }

    // ========================================================================
    // Value access
    // ========================================================================

    /// Assign through the converter's `set` hook
    pub fn write(&self, data: &mut Document, value: Value) {
        data.insert(self.name.clone(), self.ty.set(value));
    }

    /// Read through the converter's `get` hook, storing the normalized value
    pub fn read(&self, data: &mut Document) -> Value {
        let raw = data.remove(&self.name).unwrap_or(Value::Null);
        let value = self.ty.get(raw);
        data.insert(self.name.clone(), value.clone());
        value
    }

    // ========================================================================
    // Store commands
    // ========================================================================

    /// Queue the load of this field
    pub fn queue_load(&self, pipeline: &mut Pipeline<'_>, record_key: &str) -> PendingLoad {
        self.ty.queue_load(pipeline, record_key, &self.name)
    }

    /// Convert `value` and queue its save
    pub fn queue_save(
        &self,
        pipeline: &mut Pipeline<'_>,
        record_key: &str,
        value: &Value,
    ) -> Result<()> {
        let wire = self
            .ty
            .to_db(value)
            .map_err(|e| Error::conversion(&self.name, e))?;
        self.ty
            .queue_save(pipeline, record_key, &self.name, wire)
            .map_err(|e| Error::conversion(&self.name, e))
    }

    /// Queue removal of this field's own storage
    pub fn queue_delete(&self, pipeline: &mut Pipeline<'_>, record_key: &str) {
        self.ty.queue_delete(pipeline, record_key, &self.name);
    }

    /// Decode a resolved load
    pub fn decode(&self, pending: &PendingLoad) -> Result<Option<Value>> {
        match pending.wire()? {
            None => Ok(None),
            Some(wire) => self
                .ty
                .from_db(wire)
                .map(Some)
                .map_err(|e| Error::conversion(&self.name, e)),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("type", &self.ty.tag())
            .field("primary_key", &self.primary_key)
            .finish()
    }
}
