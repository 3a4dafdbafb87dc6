//! Type-tag registry
//!
//! Process-wide table mapping a fragment's type tag to the check that
//! decides whether a value is of that type. Built-in tags are present from
//! first use; applications add their own with [`register_type`] during
//! start-up.
//!
//! | Tag | Accepts |
//! |-----|---------|
//! | `boolean` | `Bool` |
//! | `binary` | `Bytes` |
//! | `date` | `Date` |
//! | `datetime` | `DateTime` |
//! | `float` | `Float` |
//! | `integer` | `Int` |
//! | `number` | `Int` or `Float` |
//! | `string` | `String` |
//! | `ipaddress` | any `Ip` |
//! | `ipv4address` | IPv4 `Ip` |
//! | `ipv6address` | IPv6 `Ip` |
//! | `list` | `List` |
//! | `set` | `Set` |

use crate::error::{SchemaError, SchemaResult};
use kvmodel_core::Value;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Predicate deciding whether a value belongs to a type tag
pub type TypeCheck = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

static REGISTRY: Lazy<RwLock<FxHashMap<String, TypeCheck>>> =
    Lazy::new(|| RwLock::new(builtin_types()));

fn builtin_types() -> FxHashMap<String, TypeCheck> {
    let builtins: [(&str, fn(&Value) -> bool); 13] = [
        ("boolean", |v| matches!(v, Value::Bool(_))),
        ("binary", |v| matches!(v, Value::Bytes(_))),
        ("date", |v| matches!(v, Value::Date(_))),
        ("datetime", |v| matches!(v, Value::DateTime(_))),
        ("float", |v| matches!(v, Value::Float(_))),
        ("integer", |v| matches!(v, Value::Int(_))),
        ("number", |v| matches!(v, Value::Int(_) | Value::Float(_))),
        ("string", |v| matches!(v, Value::String(_))),
        ("ipaddress", |v| matches!(v, Value::Ip(_))),
        ("ipv4address", |v| matches!(v, Value::Ip(IpAddr::V4(_)))),
        ("ipv6address", |v| matches!(v, Value::Ip(IpAddr::V6(_)))),
        ("list", |v| matches!(v, Value::List(_))),
        ("set", |v| matches!(v, Value::Set(_))),
    ];
    builtins
        .into_iter()
        .map(|(tag, check)| (tag.to_string(), Arc::new(check) as TypeCheck))
        .collect()
}

/// Register (or replace) the check for a type tag
///
/// Returns `true` when an existing check was replaced.
///
/// # Example
///
/// ```ignore
/// register_type("even", |v| matches!(v, Value::Int(n) if n % 2 == 0))?;
/// ```
pub fn register_type<F>(tag: &str, check: F) -> SchemaResult<bool>
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    if tag.is_empty() {
        return Err(SchemaError::EmptyTag);
    }
    let previous = REGISTRY
        .write()
        .insert(tag.to_string(), Arc::new(check));
    Ok(previous.is_some())
}

/// True when the tag is known
pub fn is_registered(tag: &str) -> bool {
    REGISTRY.read().contains_key(tag)
}

/// Run the check for `tag`; `None` when the tag is unknown
pub fn check(tag: &str, value: &Value) -> Option<bool> {
    // Clone the Arc so user checks never run under the registry lock
    let check = REGISTRY.read().get(tag).cloned()?;
    Some(check(value))
}
