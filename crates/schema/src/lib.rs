//! Schema validation for kvmodel records
//!
//! A deliberately small validator. It knows nothing about stores or
//! records; it receives a [`Schema`] (field name → [`Fragment`]) and a
//! [`Document`] and either normalizes it or reports per-field errors.
//!
//! - [`Fragment`]: type tag plus optional constraints for one field
//! - [`Validator`]: `normalized` (inject defaults) and `validate`
//! - [`registry`]: process-wide type tag → check function table
//!
//! # Example
//!
//! ```ignore
//! let mut schema = Schema::new();
//! schema.insert("id", Fragment::new("string").required());
//! schema.insert("created", Fragment::new("datetime").default(DefaultValue::UtcNow));
//!
//! let validator = Validator::new(&schema);
//! let doc = validator.normalized(&doc);
//! validator.validate(&doc)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fragment;
pub mod registry;
pub mod validator;

pub use error::{FieldErrors, SchemaError, SchemaResult};
pub use fragment::{DefaultValue, Document, Fragment, Schema};
pub use registry::{register_type, TypeCheck};
pub use validator::Validator;
