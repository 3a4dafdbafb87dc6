//! Model declaration and registration
//!
//! A model is a named set of fields with exactly one primary key. It is
//! declared with a [`ModelBuilder`] and registered into an immutable
//! [`ModelSchema`] that records share through an `Arc`.
//!
//! ## Registration Checks
//!
//! | Check | Failure |
//! |-------|---------|
//! | field names are unique | `Error::Configuration` |
//! | exactly one primary key (concrete models) | `Error::Configuration` |
//! | every constraint compiles (regex) | `Error::Configuration` |
//!
//! Abstract models skip the primary-key check. They exist to be extended
//! and refuse every store operation.
//!
//! # Example
//!
//! ```ignore
//! struct User;
//!
//! impl Model for User {
//!     const NAME: &'static str = "User";
//!
//!     fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
//!         Ok(builder
//!             .field(Field::new("id", Text).primary_key())
//!             .field(Field::new("email", EmailAddress).required())
//!             .field(Field::new("tags", Set::of(Text)?)))
//!     }
//! }
//!
//! let user = User::create(&store, [("id", "7".into()), ("email", "a@b.io".into())])?;
//! let again = User::load(&store, "7", &[])?;
//! ```

use crate::error::{Error, Result};
use crate::field::Field;
use crate::record::Record;
use crate::registry;
use kvmodel_core::{record_key, ConvertError, Value};
use kvmodel_pipeline::Pipeline;
use kvmodel_schema::Schema;
use kvmodel_storage::Store;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// ModelBuilder
// ============================================================================

/// Collects fields before registration
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
    abstract_model: bool,
}

impl ModelBuilder {
    /// Builder for a model called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            abstract_model: false,
        }
    }

    /// Declare a field
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Inherit every field of `base`, ahead of the fields declared here
    pub fn extends(mut self, base: &ModelSchema) -> Self {
        let mut fields = base.fields.clone();
        fields.append(&mut self.fields);
        self.fields = fields;
        self
    }

    /// Mark as a base model: no primary key required, no persistence
    pub fn abstract_model(mut self) -> Self {
        self.abstract_model = true;
        self
    }

    /// Validate the declaration and build the schema
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for duplicate field names, a wrong number of
    /// primary keys, or a constraint that does not compile.
    pub fn register(self) -> Result<ModelSchema> {
        let ModelBuilder {
            name,
            mut fields,
            abstract_model,
        } = self;

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(Error::Configuration(format!(
                    "{} declares field '{}' more than once",
                    name,
                    field.name()
                )));
            }
        }

        let keys: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_primary_key())
            .map(|(i, _)| i)
            .collect();
        let primary_key = match (keys.as_slice(), abstract_model) {
            ([index], _) => Some(*index),
            ([], true) => None,
            ([], false) => {
                return Err(Error::Configuration(format!(
                    "{} declares no primary key",
                    name
                )))
            }
            (many, _) => {
                return Err(Error::Configuration(format!(
                    "{} declares {} primary keys, expected exactly one",
                    name,
                    many.len()
                )))
            }
        };

        let mut schema = Schema::new();
        for field in fields.iter_mut() {
            field.bind(&name)?;
            schema.insert(field.name(), field.fragment().clone());
        }

        debug!(model = %name, fields = fields.len(), abstract_model, "registered model");

        Ok(ModelSchema {
            name,
            fields,
            primary_key,
            schema,
            abstract_model,
        })
    }
}

// ============================================================================
// ModelSchema
// ============================================================================

/// Registered, immutable description of a model
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    fields: Vec<Field>,
    primary_key: Option<usize>,
    schema: Schema,
    abstract_model: bool,
}

impl ModelSchema {
    /// Model name, the prefix of every record key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order (inherited first)
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field by name, for symbolic references in selective calls
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// The primary-key field; `None` only for abstract models
    pub fn primary_key(&self) -> Option<&Field> {
        self.primary_key.map(|i| &self.fields[i])
    }

    /// Aggregate validation schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// True for base models that cannot be persisted
    pub fn is_abstract(&self) -> bool {
        self.abstract_model
    }

    /// Storage key for a primary-key wire value: `{Name}::{id}`
    pub fn key(&self, id: &str) -> String {
        record_key(&self.name, id)
    }

    /// Storage key for a primary-key value, converted by the key's converter
    ///
    /// The wire form must be valid UTF-8 so that distinct ids never share a
    /// key; anything else is a conversion error.
    pub fn key_for(&self, id: &Value) -> Result<String> {
        let pk = self.persistable()?;
        let id = pk
            .field_type()
            .to_db(id)
            .and_then(|w| w.into_scalar())
            .and_then(|bytes| {
                String::from_utf8(bytes).map_err(|e| ConvertError::malformed("key", e))
            })
            .map_err(|e| Error::conversion(pk.name(), e))?;
        Ok(self.key(&id))
    }

    /// Resolve a field subset; an empty subset means every field
    pub fn resolve_fields(&self, names: &[&str]) -> Result<Vec<&Field>> {
        if names.is_empty() {
            return Ok(self.fields.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.field(name).ok_or_else(|| Error::UnknownField {
                    model: self.name.clone(),
                    field: name.to_string(),
                })
            })
            .collect()
    }

    /// The primary key, or an error for abstract models
    pub(crate) fn persistable(&self) -> Result<&Field> {
        self.primary_key().ok_or_else(|| {
            Error::Configuration(format!(
                "{} is abstract and cannot be persisted",
                self.name
            ))
        })
    }

    // ========================================================================
    // Record operations
    // ========================================================================

    /// Empty, unbound record of this model
    pub fn new_record(self: &Arc<Self>) -> Record {
        Record::new(Arc::clone(self))
    }

    /// Build a record from values and save every field
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownField`] for a value naming no field
    /// - any error of [`Record::save`], including
    ///   [`Error::MissingPrimaryKey`] when no primary-key value is given
    pub fn create<K, V, I>(self: &Arc<Self>, store: &dyn Store, values: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.persistable()?;
        let mut record = Record::with_values(Arc::clone(self), values)?;
        record.save(store, &[])?;
        Ok(record)
    }

    /// Load the record with primary key `id`
    ///
    /// Only `fields` are read (every field when empty). The record is
    /// returned even when nothing is stored under its key; absent fields
    /// stay unset.
    pub fn load(
        self: &Arc<Self>,
        store: &dyn Store,
        id: impl Into<Value>,
        fields: &[&str],
    ) -> Result<Record> {
        let pk = self.persistable()?;
        let mut record = Record::new(Arc::clone(self));
        record.set(pk.name(), id)?;
        record.load_fields(store, fields)?;
        Ok(record)
    }

    /// True when a record hash exists for `id`
    pub fn exists(&self, store: &dyn Store, id: impl Into<Value>) -> Result<bool> {
        let key = self.key_for(&id.into())?;
        let mut pipeline = Pipeline::new(store);
        let found = pipeline.exists(&key);
        pipeline.execute()?;
        Ok(found.value()?.unwrap_or(false))
    }
}

// ============================================================================
// Model trait
// ============================================================================

/// A Rust type standing for a registered model
///
/// Implementors only declare; registration happens once per type on first
/// use and the resulting schema is cached process-wide.
pub trait Model: Sized + 'static {
    /// Model name, used as the key prefix
    const NAME: &'static str;

    /// Add fields (and `extends` / `abstract_model` markers) to `builder`
    fn declare(builder: ModelBuilder) -> Result<ModelBuilder>;

    /// Registered schema of this model
    fn schema() -> Result<Arc<ModelSchema>> {
        registry::schema_of::<Self>()
    }

    /// Empty record of this model
    fn new_record() -> Result<Record> {
        Ok(Self::schema()?.new_record())
    }

    /// Storage key for a primary-key wire value
    fn key(id: &str) -> String {
        record_key(Self::NAME, id)
    }

    /// See [`ModelSchema::create`]
    fn create<K, V, I>(store: &dyn Store, values: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::schema()?.create(store, values)
    }

    /// See [`ModelSchema::load`]
    fn load(store: &dyn Store, id: impl Into<Value>, fields: &[&str]) -> Result<Record> {
        Self::schema()?.load(store, id, fields)
    }

    /// See [`ModelSchema::exists`]
    fn exists(store: &dyn Store, id: impl Into<Value>) -> Result<bool> {
        Self::schema()?.exists(store, id)
    }
}
