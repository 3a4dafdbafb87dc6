//! Scalar converters: booleans, bytes, numbers and strings

use super::{scalar, utf8, wrong_type, FieldType, WireValue};
use kvmodel_core::{ConvertError, ConvertResult, Value};
use kvmodel_schema::{Fragment, SchemaResult};

/// Pattern an [`EmailAddress`] must match
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

/// `true` / `false`, stored as `1` / `0`
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl FieldType for Boolean {
    fn tag(&self) -> &'static str {
        "boolean"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Bool(true) => scalar("1"),
            Value::Bool(false) => scalar("0"),
            other => Err(wrong_type("Bool", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        let n: i64 = text
            .trim()
            .parse()
            .map_err(|e| ConvertError::malformed("boolean", e))?;
        Ok(Value::Bool(n != 0))
    }
}

/// Raw bytes, stored as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Binary;

impl FieldType for Binary {
    fn tag(&self) -> &'static str {
        "binary"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Bytes(bytes) => scalar(bytes.clone()),
            other => Err(wrong_type("Bytes", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        Ok(Value::Bytes(wire.into_scalar()?))
    }
}

/// 64-bit float
///
/// Encoded with the shortest text that parses back to the same bits, always
/// carrying a fraction or exponent (`5.0`, not `5`). Integers assigned to a
/// float field are widened on assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl FieldType for Float {
    fn tag(&self) -> &'static str {
        "float"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Float(f) => scalar(format!("{:?}", f)),
            Value::Int(n) => scalar(format!("{:?}", *n as f64)),
            other => Err(wrong_type("Float", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        text.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| ConvertError::malformed("float", e))
    }

    fn set(&self, value: Value) -> Value {
        match value {
            Value::Int(n) => Value::Float(n as f64),
            other => other,
        }
    }
}

/// 64-bit signed integer, stored as decimal text
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl FieldType for Integer {
    fn tag(&self) -> &'static str {
        "integer"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Int(n) => scalar(n.to_string()),
            other => Err(wrong_type("Int", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        text.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| ConvertError::malformed("integer", e))
    }
}

/// Integer or float
///
/// Decoding yields `Int` when the stored text is an integer literal and
/// `Float` otherwise. Floats always encode with a fraction or exponent, so
/// the kind survives the round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl FieldType for Number {
    fn tag(&self) -> &'static str {
        "number"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Int(n) => scalar(n.to_string()),
            Value::Float(f) => scalar(format!("{:?}", f)),
            other => Err(wrong_type("Int or Float", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Int(n));
        }
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| ConvertError::malformed("number", e))
    }
}

/// UTF-8 string
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl FieldType for Text {
    fn tag(&self) -> &'static str {
        "string"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::String(s) => scalar(s.as_bytes()),
            other => Err(wrong_type("String", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        utf8(self.tag(), wire).map(Value::String)
    }
}

/// String constrained by [`EMAIL_PATTERN`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailAddress;

impl FieldType for EmailAddress {
    fn tag(&self) -> &'static str {
        "string"
    }

    fn schema(&self) -> SchemaResult<Fragment> {
        Fragment::new(self.tag()).regex(EMAIL_PATTERN)
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        Text.to_db(value)
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        Text.from_db(wire)
    }
}
