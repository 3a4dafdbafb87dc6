//! Record instances and their store operations
//!
//! A [`Record`] is a model schema plus a map of field values. Every store
//! operation opens one pipeline and executes it once, so each call costs a
//! single round trip:
//!
//! | Operation | Pipeline | Commands |
//! |-----------|----------|----------|
//! | `load_fields` | plain | one load per targeted field |
//! | `save` | transaction | `HSET` per scalar, `DEL` + push per container |
//! | `delete` | plain | `DEL` per container, then `DEL` of the record hash |
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound --save/create--> Persisted --save/load_fields--> Persisted
//!    ^                                                         |
//!    +------------------------- delete ------------------------+
//! ```
//!
//! After `delete` a record is an ordinary in-memory value. Deleting again,
//! or deleting a record that was never saved, is a no-op.
//!
//! There is no optimistic concurrency: two writers saving the same record
//! race according to the store's transaction isolation.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::model::ModelSchema;
use kvmodel_core::Value;
use kvmodel_pipeline::Pipeline;
use kvmodel_schema::{Document, Validator};
use kvmodel_storage::Store;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One instance of a registered model
#[derive(Clone)]
pub struct Record {
    schema: Arc<ModelSchema>,
    data: Document,
}

impl Record {
    /// Empty record of `schema`
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            data: Document::new(),
        }
    }

    /// Record initialised from `(field, value)` pairs, each assigned through
    /// its field
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] for a name the model does not declare.
    pub fn with_values<K, V, I>(schema: Arc<ModelSchema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Self::new(schema);
        for (name, value) in values {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    // ========================================================================
    // Field access
    // ========================================================================

    /// Registered schema
    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Model name
    pub fn model_name(&self) -> &str {
        self.schema.name()
    }

    fn field(&self, name: &str) -> Result<&Field> {
        self.schema.field(name).ok_or_else(|| Error::UnknownField {
            model: self.schema.name().to_string(),
            field: name.to_string(),
        })
    }

    /// Read a field through its converter; unset fields read as `Null`
    pub fn get(&mut self, name: &str) -> Result<Value> {
        let schema = Arc::clone(&self.schema);
        let field = schema.field(name).ok_or_else(|| Error::UnknownField {
            model: schema.name().to_string(),
            field: name.to_string(),
        })?;
        Ok(field.read(&mut self.data))
    }

    /// Stored value of a field without applying the read hook
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|v| !v.is_null())
    }

    /// Assign a field through its converter
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let schema = Arc::clone(&self.schema);
        let field = schema.field(name).ok_or_else(|| Error::UnknownField {
            model: schema.name().to_string(),
            field: name.to_string(),
        })?;
        field.write(&mut self.data, value.into());
        Ok(())
    }

    /// Clear a field
    pub fn unset(&mut self, name: &str) -> Result<()> {
        self.field(name)?;
        self.data.remove(name);
        Ok(())
    }

    /// Current values of set fields, by name
    pub fn values(&self) -> &Document {
        &self.data
    }

    /// Primary-key value, if set
    pub fn id(&self) -> Option<&Value> {
        let pk = self.schema.primary_key()?;
        self.peek(pk.name())
    }

    /// Storage key `{Model}::{pk wire value}`
    ///
    /// # Errors
    ///
    /// [`Error::MissingPrimaryKey`] when the primary key is unset.
    pub fn record_key(&self) -> Result<String> {
        key_of(&self.schema, &self.data)
    }

    // ========================================================================
    // Store operations
    // ========================================================================

    /// Read `fields` (every field when empty) from the store
    ///
    /// Fields absent from the store keep their current value.
    pub fn load_fields(&mut self, store: &dyn Store, fields: &[&str]) -> Result<()> {
        let schema = Arc::clone(&self.schema);
        schema.persistable()?;
        let key = self.record_key()?;
        let targets = schema.resolve_fields(fields)?;

        let mut pipeline = Pipeline::new(store);
        let pending: Vec<_> = targets
            .iter()
            .map(|field| (*field, field.queue_load(&mut pipeline, &key)))
            .collect();
        debug!(key = %key, fields = pending.len(), "loading record");
        pipeline.execute()?;

        for (field, load) in &pending {
            if let Some(value) = field.decode(load)? {
                field.write(&mut self.data, value);
            }
        }
        Ok(())
    }

    /// Normalize and validate `fields` (every field when empty)
    ///
    /// Returns the normalized values of the targeted fields, defaults
    /// included. Unset and null fields count as absent. Performs no I/O and
    /// does not modify the record.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] with the messages of every failing field.
    pub fn validate(&self, fields: &[&str]) -> Result<Document> {
        let targets = self.schema.resolve_fields(fields)?;
        let names: Vec<&str> = targets.iter().map(|f| f.name()).collect();
        let schema = self.schema.schema().restrict(&names);

        let doc: Document = targets
            .iter()
            .filter_map(|f| {
                self.peek(f.name())
                    .map(|v| (f.name().to_string(), v.clone()))
            })
            .collect();

        Ok(Validator::new(&schema).check(&doc)?)
    }

    /// Persist `fields` (every field when empty) in one transaction
    ///
    /// Validation runs first; on failure nothing reaches the store. Unset
    /// fields are skipped, never written as empty. Values injected by
    /// normalization (defaults) are kept on the record.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingPrimaryKey`] when the key is unset and has no default
    /// - [`Error::Validation`] when validation fails
    /// - [`Error::Conversion`] when a value has no wire form
    /// - [`Error::StoreCommand`] / [`Error::Store`] from the round trip
    pub fn save(&mut self, store: &dyn Store, fields: &[&str]) -> Result<()> {
        let schema = Arc::clone(&self.schema);
        let pk = schema.persistable()?;
        if self.id().is_none() && pk.fragment().default.is_none() {
            return Err(self.missing_primary_key());
        }

        let targets = schema.resolve_fields(fields)?;
        let normalized = self.validate(fields)?;
        let mut data = self.data.clone();
        for (name, value) in normalized.iter() {
            if let Some(field) = schema.field(name) {
                field.write(&mut data, value.clone());
            }
        }
        let key = key_of(&schema, &data)?;

        let mut pipeline = Pipeline::transaction(store);
        for field in &targets {
            match data.get(field.name()) {
                Some(value) if !value.is_null() => {
                    field.queue_save(&mut pipeline, &key, value)?;
                }
                _ => {}
            }
        }
        debug!(key = %key, commands = pipeline.len(), "saving record");
        pipeline.execute()?;

        self.data = data;
        Ok(())
    }

    /// Remove the record hash and every container key
    ///
    /// A record without a primary-key value has nothing stored and returns
    /// without contacting the store.
    pub fn delete(&self, store: &dyn Store) -> Result<()> {
        self.schema.persistable()?;
        let key = match self.record_key() {
            Ok(key) => key,
            Err(Error::MissingPrimaryKey { .. }) => return Ok(()),
            Err(e) => return Err(e),
        };

        let mut pipeline = Pipeline::new(store);
        for field in self.schema.fields() {
            field.queue_delete(&mut pipeline, &key);
        }
        pipeline.del(&key);
        debug!(key = %key, commands = pipeline.len(), "deleting record");
        pipeline.execute()?;
        Ok(())
    }

    /// True when the record hash exists in the store
    pub fn exists(&self, store: &dyn Store) -> Result<bool> {
        self.schema.persistable()?;
        let key = self.record_key()?;
        let mut pipeline = Pipeline::new(store);
        let found = pipeline.exists(&key);
        pipeline.execute()?;
        Ok(found.value()?.unwrap_or(false))
    }

    fn missing_primary_key(&self) -> Error {
        Error::MissingPrimaryKey {
            model: self.schema.name().to_string(),
        }
    }
}

fn key_of(schema: &ModelSchema, data: &Document) -> Result<String> {
    let pk = schema.persistable()?;
    match data.get(pk.name()) {
        Some(id) if !id.is_null() => schema.key_for(id),
        _ => Err(Error::MissingPrimaryKey {
            model: schema.name().to_string(),
        }),
    }
}

/// `Name(f1=v1, f2=None)` over every declared field, in declaration order
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema.name())?;
        for (i, field) in self.schema.fields().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.peek(field.name()) {
                Some(value) => write!(f, "{}={}", field.name(), value)?,
                None => write!(f, "{}=None", field.name())?,
            }
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.schema.name())
            .field("data", &self.data)
            .finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.data == other.data
    }
}
