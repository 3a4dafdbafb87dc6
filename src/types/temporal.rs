//! Date and timestamp converters (ISO-8601 text, no time zone)

use super::{scalar, utf8, wrong_type, FieldType, WireValue};
use chrono::{NaiveDate, NaiveDateTime};
use kvmodel_core::{ConvertError, ConvertResult, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Calendar date, stored as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl FieldType for Date {
    fn tag(&self) -> &'static str {
        "date"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Date(d) => scalar(d.format(DATE_FORMAT).to_string()),
            other => Err(wrong_type("Date", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| ConvertError::malformed("date", e))
    }
}

/// Timestamp, stored as `YYYY-MM-DDTHH:MM:SS` with an optional fraction
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTime;

impl FieldType for DateTime {
    fn tag(&self) -> &'static str {
        "datetime"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::DateTime(dt) => scalar(dt.format(DATETIME_FORMAT).to_string()),
            other => Err(wrong_type("DateTime", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .map(Value::DateTime)
            .map_err(|e| ConvertError::malformed("datetime", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wire(text: &str) -> WireValue {
        WireValue::Scalar(text.as_bytes().to_vec())
    }

    #[test]
    fn test_date_is_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Date.to_db(&Value::Date(d)).unwrap(), wire("2024-03-09"));
        assert_eq!(Date.from_db(wire("2024-03-09")).unwrap(), Value::Date(d));
    }

    #[test]
    fn test_datetime_fraction_is_optional() {
        let whole = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();
        assert_eq!(
            DateTime.to_db(&Value::DateTime(whole)).unwrap(),
            wire("2024-03-09T12:30:05")
        );

        let micros = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(12, 30, 5, 250)
            .unwrap();
        assert_eq!(
            DateTime.from_db(wire("2024-03-09T12:30:05.000250")).unwrap(),
            Value::DateTime(micros)
        );
    }

    #[test]
    fn test_malformed_dates() {
        assert!(Date.from_db(wire("2024-13-01")).is_err());
        assert!(DateTime.from_db(wire("2024-03-09")).is_err());
        assert!(Date.to_db(&Value::from("2024-03-09")).is_err());
    }

    proptest! {
        #[test]
        fn prop_date_round_trip(days in -100_000i32..100_000) {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let d = epoch + chrono::Duration::days(i64::from(days));
            let value = Value::Date(d);
            prop_assert_eq!(Date.from_db(Date.to_db(&value).unwrap()).unwrap(), value);
        }

        #[test]
        fn prop_datetime_round_trip(secs in 0i64..4_000_000_000, nanos in 0u32..1_000_000_000) {
            let dt = chrono::DateTime::from_timestamp(secs, nanos).unwrap().naive_utc();
            let value = Value::DateTime(dt);
            prop_assert_eq!(DateTime.from_db(DateTime.to_db(&value).unwrap()).unwrap(), value);
        }
    }
}
