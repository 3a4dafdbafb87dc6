//! Type converters
//!
//! A converter knows three things about one kind of field value:
//!
//! 1. its validation contract ([`FieldType::schema`])
//! 2. its wire format ([`FieldType::to_db`] / [`FieldType::from_db`])
//! 3. the store commands that load, save and delete it
//!
//! Scalars live in the record's hash under the field name. Containers live
//! under an auxiliary key `{record_key}::{field}` and are always saved as a
//! full replace.
//!
//! ## Round-Trip Law
//!
//! For every converter and every value `v` it accepts,
//! `from_db(to_db(v)) == v`.

mod container;
mod network;
mod scalar;
mod temporal;

pub use container::{List, Set};
pub use network::{IpAddress, Ipv4Address, Ipv6Address};
pub use scalar::{Binary, Boolean, EmailAddress, Float, Integer, Number, Text, EMAIL_PATTERN};
pub use temporal::{Date, DateTime};

use kvmodel_core::{ConvertError, ConvertResult, Value};
use kvmodel_pipeline::{Deferred, Pipeline, PipelineResult};
use kvmodel_schema::{Fragment, SchemaResult};
use std::fmt;

// ============================================================================
// Wire values
// ============================================================================

/// Store representation of one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// One binary-safe string, stored in the record hash
    Scalar(Vec<u8>),
    /// Container elements, stored under the auxiliary key
    Elements(Vec<Vec<u8>>),
}

impl WireValue {
    /// The scalar bytes, or a shape error
    pub fn into_scalar(self) -> ConvertResult<Vec<u8>> {
        match self {
            WireValue::Scalar(bytes) => Ok(bytes),
            WireValue::Elements(_) => Err(ConvertError::Shape { expected: "scalar" }),
        }
    }

    /// The container elements, or a shape error
    pub fn into_elements(self) -> ConvertResult<Vec<Vec<u8>>> {
        match self {
            WireValue::Elements(items) => Ok(items),
            WireValue::Scalar(_) => Err(ConvertError::Shape {
                expected: "elements",
            }),
        }
    }
}

/// Load queued for one field, resolved when its pipeline executes
#[derive(Debug)]
pub enum PendingLoad {
    /// `HGET` of a scalar field
    Scalar(Deferred<Vec<u8>>),
    /// `LRANGE` / `SMEMBERS` of a container field
    Elements(Deferred<Vec<Vec<u8>>>),
}

impl PendingLoad {
    /// Wire value read from the store; `None` when the field is absent
    ///
    /// An empty container reads as absent: the store cannot tell the two
    /// apart.
    pub fn wire(&self) -> PipelineResult<Option<WireValue>> {
        Ok(match self {
            PendingLoad::Scalar(d) => d.value()?.map(WireValue::Scalar),
            PendingLoad::Elements(d) => d
                .value()?
                .filter(|items| !items.is_empty())
                .map(WireValue::Elements),
        })
    }
}

// ============================================================================
// FieldType
// ============================================================================

/// Conversion and persistence behaviour of one value type
///
/// The provided command methods implement scalar storage (one hash field);
/// container converters override them.
pub trait FieldType: fmt::Debug + Send + Sync {
    /// Type tag understood by the validator
    fn tag(&self) -> &'static str;

    /// Validation contract for values of this type
    fn schema(&self) -> SchemaResult<Fragment> {
        Ok(Fragment::new(self.tag()))
    }

    /// True for list and set converters
    fn is_container(&self) -> bool {
        false
    }

    /// Encode a value for the store
    fn to_db(&self, value: &Value) -> ConvertResult<WireValue>;

    /// Decode a value read from the store
    fn from_db(&self, wire: WireValue) -> ConvertResult<Value>;

    /// Transform applied when a value is assigned
    fn set(&self, value: Value) -> Value {
        value
    }

    /// Transform applied when a value is read
    fn get(&self, value: Value) -> Value {
        value
    }

    /// Queue the command that reads this field
    fn queue_load(&self, pipeline: &mut Pipeline<'_>, record_key: &str, field: &str) -> PendingLoad {
        PendingLoad::Scalar(pipeline.hget(record_key, field))
    }

    /// Queue the commands that write `wire` for this field
    fn queue_save(
        &self,
        pipeline: &mut Pipeline<'_>,
        record_key: &str,
        field: &str,
        wire: WireValue,
    ) -> ConvertResult<()> {
        pipeline.hset(record_key, field, wire.into_scalar()?);
        Ok(())
    }

    /// Queue the commands that remove this field's own storage
    ///
    /// Scalars need none: deleting the record hash removes them.
    fn queue_delete(&self, _pipeline: &mut Pipeline<'_>, _record_key: &str, _field: &str) {}
}

// ============================================================================
// Helpers shared by scalar converters
// ============================================================================

pub(crate) fn wrong_type(expected: &'static str, value: &Value) -> ConvertError {
    ConvertError::WrongType {
        expected,
        actual: value.type_name(),
    }
}

pub(crate) fn utf8(tag: &'static str, wire: WireValue) -> ConvertResult<String> {
    String::from_utf8(wire.into_scalar()?).map_err(|e| ConvertError::malformed(tag, e))
}

pub(crate) fn scalar(text: impl Into<Vec<u8>>) -> ConvertResult<WireValue> {
    Ok(WireValue::Scalar(text.into()))
}
