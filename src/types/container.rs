//! Container converters
//!
//! A container field keeps its elements under an auxiliary key next to the
//! record hash:
//!
//! ```text
//! User::7          hash   { id: "7", name: "ada" }
//! User::7::tags    list   [ "a", "b", "c" ]
//! User::7::roles   set    { "admin" }
//! ```
//!
//! Saving is a full replace: `DEL` the auxiliary key, then push every
//! element again. Elements are converted with the element converter, which
//! must be a scalar.

use super::{wrong_type, FieldType, PendingLoad, WireValue};
use crate::error::{Error, Result};
use kvmodel_core::{aux_key, ConvertResult, Value};
use kvmodel_pipeline::Pipeline;
use kvmodel_schema::{Fragment, SchemaResult};
use std::sync::Arc;

fn element_type(container: &str, item: Arc<dyn FieldType>) -> Result<Arc<dyn FieldType>> {
    if item.is_container() {
        return Err(Error::Configuration(format!(
            "{} elements cannot be containers (got {})",
            container,
            item.tag()
        )));
    }
    Ok(item)
}

fn encode_elements(item: &dyn FieldType, elements: &[Value]) -> ConvertResult<WireValue> {
    elements
        .iter()
        .map(|element| item.to_db(element)?.into_scalar())
        .collect::<ConvertResult<Vec<_>>>()
        .map(WireValue::Elements)
}

fn decode_elements(item: &dyn FieldType, wire: WireValue) -> ConvertResult<Vec<Value>> {
    wire.into_elements()?
        .into_iter()
        .map(|bytes| item.from_db(WireValue::Scalar(bytes)))
        .collect()
}

/// Ordered sequence, stored as a store list
#[derive(Debug, Clone)]
pub struct List {
    item: Arc<dyn FieldType>,
}

impl List {
    /// List of `item` values
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when `item` is itself a container.
    pub fn of(item: impl FieldType + 'static) -> Result<Self> {
        Ok(Self {
            item: element_type("list", Arc::new(item))?,
        })
    }

    /// Element converter
    pub fn item(&self) -> &dyn FieldType {
        self.item.as_ref()
    }
}

impl FieldType for List {
    fn tag(&self) -> &'static str {
        "list"
    }

    fn schema(&self) -> SchemaResult<Fragment> {
        Ok(Fragment::new(self.tag()).items(self.item.schema()?))
    }

    fn is_container(&self) -> bool {
        true
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::List(elements) => encode_elements(self.item.as_ref(), elements),
            other => Err(wrong_type("List", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        decode_elements(self.item.as_ref(), wire).map(Value::List)
    }

    fn set(&self, value: Value) -> Value {
        match value {
            Value::List(elements) => {
                Value::List(elements.into_iter().map(|v| self.item.set(v)).collect())
            }
            other => other,
        }
    }

    fn get(&self, value: Value) -> Value {
        match value {
            Value::List(elements) if elements.is_empty() => Value::Null,
            Value::List(elements) => {
                Value::List(elements.into_iter().map(|v| self.item.get(v)).collect())
            }
            other => other,
        }
    }

    fn queue_load(&self, pipeline: &mut Pipeline<'_>, record_key: &str, field: &str) -> PendingLoad {
        PendingLoad::Elements(pipeline.lrange(&aux_key(record_key, field), 0, -1))
    }

    fn queue_save(
        &self,
        pipeline: &mut Pipeline<'_>,
        record_key: &str,
        field: &str,
        wire: WireValue,
    ) -> ConvertResult<()> {
        let elements = wire.into_elements()?;
        let key = aux_key(record_key, field);
        pipeline.del(&key);
        for element in elements {
            pipeline.rpush(&key, element);
        }
        Ok(())
    }

    fn queue_delete(&self, pipeline: &mut Pipeline<'_>, record_key: &str, field: &str) {
        pipeline.del(&aux_key(record_key, field));
    }
}

/// Unordered collection of distinct values, stored as a store set
///
/// Assigning a list to a set field converts it and drops duplicates.
#[derive(Debug, Clone)]
pub struct Set {
    item: Arc<dyn FieldType>,
}

impl Set {
    /// Set of `item` values
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when `item` is itself a container.
    pub fn of(item: impl FieldType + 'static) -> Result<Self> {
        Ok(Self {
            item: element_type("set", Arc::new(item))?,
        })
    }

    /// Element converter
    pub fn item(&self) -> &dyn FieldType {
        self.item.as_ref()
    }
}

impl FieldType for Set {
    fn tag(&self) -> &'static str {
        "set"
    }

    fn schema(&self) -> SchemaResult<Fragment> {
        Ok(Fragment::new(self.tag()).items(self.item.schema()?))
    }

    fn is_container(&self) -> bool {
        true
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Set(elements) => encode_elements(self.item.as_ref(), elements),
            other => Err(wrong_type("Set", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        decode_elements(self.item.as_ref(), wire).map(Value::set_of)
    }

    fn set(&self, value: Value) -> Value {
        match value {
            Value::List(elements) | Value::Set(elements) => {
                Value::set_of(elements.into_iter().map(|v| self.item.set(v)))
            }
            other => other,
        }
    }

    fn get(&self, value: Value) -> Value {
        match value {
            Value::Set(elements) if elements.is_empty() => Value::Null,
            Value::Set(elements) => Value::set_of(elements.into_iter().map(|v| self.item.get(v))),
            other => other,
        }
    }

    fn queue_load(&self, pipeline: &mut Pipeline<'_>, record_key: &str, field: &str) -> PendingLoad {
        PendingLoad::Elements(pipeline.smembers(&aux_key(record_key, field)))
    }

    fn queue_save(
        &self,
        pipeline: &mut Pipeline<'_>,
        record_key: &str,
        field: &str,
        wire: WireValue,
    ) -> ConvertResult<()> {
        let members = wire.into_elements()?;
        let key = aux_key(record_key, field);
        pipeline.del(&key);
        for member in members {
            pipeline.sadd(&key, member);
        }
        Ok(())
    }

    fn queue_delete(&self, pipeline: &mut Pipeline<'_>, record_key: &str, field: &str) {
        pipeline.del(&aux_key(record_key, field));
    }
}
