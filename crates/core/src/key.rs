//! Storage key derivation
//!
//! Every record lives under a deterministic key built from the model name
//! and the wire form of its primary key. Container fields get an auxiliary
//! key hanging off the record key:
//!
//! ```text
//! User::42            hash with every scalar field
//! User::42::tags      list or set for the `tags` container field
//! ```

/// Separator between key segments
pub const KEY_SEPARATOR: &str = "::";

/// Key of the hash holding a record's scalar fields.
pub fn record_key(model: &str, id: &str) -> String {
    format!("{}{}{}", model, KEY_SEPARATOR, id)
}

/// Auxiliary key holding a container field's elements.
pub fn aux_key(record_key: &str, field: &str) -> String {
    format!("{}{}{}", record_key, KEY_SEPARATOR, field)
}
