//! Model API Comprehensive Test Suite
//!
//! End-to-end behaviour of declared models against the in-memory store.
//!
//! ## Key Verification Points
//!
//! 1. Every record operation costs exactly one round trip
//! 2. Store layout: hash at `{Model}::{id}`, containers at `{Model}::{id}::{field}`
//! 3. Selective save/load touch only the named fields
//! 4. Validation failures never reach the store
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test model_api_comprehensive
//!
//! # Container tests only
//! cargo test --test model_api_comprehensive containers::
//! ```

pub use kvmodel::prelude::*;
pub use kvmodel::{FieldErrors, Pipeline};

// Test modules
pub mod config;
pub mod containers;
pub mod errors;
pub mod lifecycle;
pub mod pipeline;
pub mod selective;

// =============================================================================
// SHARED TEST MODELS
// =============================================================================

/// String key `id` and integer `n`
pub struct Item;

impl Model for Item {
    const NAME: &'static str = "Item";

    fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
        Ok(builder
            .field(Field::new("id", Text).primary_key())
            .field(Field::new("n", Integer)))
    }
}

/// One field of every scalar type plus a list and a set
pub struct Profile;

impl Model for Profile {
    const NAME: &'static str = "Profile";

    fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
        Ok(builder
            .field(Field::new("id", Integer).primary_key())
            .field(Field::new("email", EmailAddress))
            .field(Field::new("active", Boolean))
            .field(Field::new("avatar", Binary))
            .field(Field::new("born", Date))
            .field(Field::new("seen", DateTime))
            .field(Field::new("score", Float))
            .field(Field::new("balance", Number))
            .field(Field::new("addr", IpAddress))
            .field(Field::new("v4", Ipv4Address))
            .field(Field::new("v6", Ipv6Address))
            .field(Field::new("history", List::of(Text)?))
            .field(Field::new("roles", Set::of(Text)?)))
    }
}

/// Abstract base contributing a timestamp with a default
pub struct Timestamped;

impl Model for Timestamped {
    const NAME: &'static str = "Timestamped";

    fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
        Ok(builder
            .field(Field::new("created", DateTime).default(DefaultValue::UtcNow))
            .abstract_model())
    }
}

/// Concrete model extending [`Timestamped`]
pub struct Note;

impl Model for Note {
    const NAME: &'static str = "Note";

    fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
        Ok(builder
            .extends(&*Timestamped::schema()?)
            .field(Field::new("id", Text).primary_key())
            .field(Field::new("body", Text).required().max_length(140)))
    }
}

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Fresh, empty store
pub fn create_store() -> MemoryStore {
    MemoryStore::new()
}

/// Wire bytes of a UTF-8 string
pub fn bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// `Value::List` of strings
pub fn string_list(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::from(*s)).collect())
}

/// `Value::Set` of strings
pub fn string_set(items: &[&str]) -> Value {
    Value::set_of(items.iter().map(|s| Value::from(*s)))
}
