//! # kvmodel
//!
//! Typed records persisted into a Redis-like key-value store.
//!
//! A model declares typed fields with exactly one primary key. Each record
//! is stored as a small cluster of keys: one hash for its scalar fields and
//! one auxiliary key per list or set field. Every create, load, save and
//! delete runs as a single batched pipeline, so it costs one round trip.
//!
//! ## Quick Start
//!
//! ```ignore
//! use kvmodel::prelude::*;
//!
//! struct Article;
//!
//! impl Model for Article {
//!     const NAME: &'static str = "Article";
//!
//!     fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
//!         Ok(builder
//!             .field(Field::new("id", Integer).primary_key())
//!             .field(Field::new("title", Text).required())
//!             .field(Field::new("tags", List::of(Text)?))
//!             .field(Field::new("published", DateTime).default(DefaultValue::UtcNow)))
//!     }
//! }
//!
//! let store = MemoryStore::new();
//!
//! // Article::1 (hash) and Article::1::tags (list), one round trip
//! let mut article = Article::create(&store, [
//!     ("id", Value::from(1)),
//!     ("title", Value::from("Pipelines")),
//!     ("tags", Value::List(vec!["rust".into(), "kv".into()])),
//! ])?;
//!
//! article.set("title", "Batched pipelines")?;
//! article.save(&store, &["title"])?;
//!
//! let loaded = Article::load(&store, 1, &[])?;
//! println!("{}", loaded);
//!
//! loaded.delete(&store)?;
//! ```
//!
//! ## Layers
//!
//! - [`types`] - converters between [`Value`] and wire bytes
//! - [`Field`] - a converter bound to a named attribute
//! - [`ModelBuilder`] / [`ModelSchema`] / [`Model`] - declaration and registration
//! - [`Record`] - an instance and its store operations
//!
//! Store access goes through the [`Store`] trait; [`MemoryStore`] is an
//! in-process implementation with Redis reply semantics.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod field;
mod model;
mod record;
mod registry;

pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use field::Field;
pub use model::{Model, ModelBuilder, ModelSchema};
pub use record::Record;
pub use registry::registered_count;

// Re-export the lower layers
pub use kvmodel_core::{aux_key, record_key, ConvertError, Value};
pub use kvmodel_pipeline::{Deferred, Pipeline, PipelineError, Resolution};
pub use kvmodel_schema::{register_type, DefaultValue, Document, FieldErrors, Fragment};
pub use kvmodel_storage::{MemoryStore, Store, StoreConfig, StoreError};
