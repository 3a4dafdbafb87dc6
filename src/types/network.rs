//! IP address converters, stored in their textual form

use super::{scalar, utf8, wrong_type, FieldType, WireValue};
use kvmodel_core::{ConvertError, ConvertResult, Value};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IPv4 or IPv6 address
#[derive(Debug, Clone, Copy, Default)]
pub struct IpAddress;

impl FieldType for IpAddress {
    fn tag(&self) -> &'static str {
        "ipaddress"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Ip(ip) => scalar(ip.to_string()),
            other => Err(wrong_type("Ip", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        text.parse::<IpAddr>()
            .map(Value::Ip)
            .map_err(|e| ConvertError::malformed("ipaddress", e))
    }
}

/// IPv4 address only
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Address;

impl FieldType for Ipv4Address {
    fn tag(&self) -> &'static str {
        "ipv4address"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Ip(IpAddr::V4(ip)) => scalar(ip.to_string()),
            other => Err(wrong_type("IPv4 Ip", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        text.parse::<Ipv4Addr>()
            .map(|ip| Value::Ip(IpAddr::V4(ip)))
            .map_err(|e| ConvertError::malformed("ipv4address", e))
    }
}

/// IPv6 address only
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6Address;

impl FieldType for Ipv6Address {
    fn tag(&self) -> &'static str {
        "ipv6address"
    }

    fn to_db(&self, value: &Value) -> ConvertResult<WireValue> {
        match value {
            Value::Ip(IpAddr::V6(ip)) => scalar(ip.to_string()),
            other => Err(wrong_type("IPv6 Ip", other)),
        }
    }

    fn from_db(&self, wire: WireValue) -> ConvertResult<Value> {
        let text = utf8(self.tag(), wire)?;
        text.parse::<Ipv6Addr>()
            .map(|ip| Value::Ip(IpAddr::V6(ip)))
            .map_err(|e| ConvertError::malformed("ipv6address", e))
    }
}
