//! Convenient imports for kvmodel.
//!
//! This module re-exports the most commonly used types so you can declare
//! and persist models with a single import:
//!
//! ```ignore
//! use kvmodel::prelude::*;
//!
//! let store = MemoryStore::new();
//! let user = User::create(&store, [("id", Value::from("7"))])?;
//! ```

// Declaration
pub use crate::field::Field;
pub use crate::model::{Model, ModelBuilder, ModelSchema};
pub use crate::record::Record;

// Error handling
pub use crate::error::{Error, Result};

// Converters
pub use crate::types::{
    Binary, Boolean, Date, DateTime, EmailAddress, FieldType, Float, Integer, IpAddress,
    Ipv4Address, Ipv6Address, List, Number, Set, Text,
};

// Values and constraints
pub use kvmodel_core::Value;
pub use kvmodel_schema::DefaultValue;

// Stores
pub use kvmodel_storage::{MemoryStore, Store, StoreConfig};
