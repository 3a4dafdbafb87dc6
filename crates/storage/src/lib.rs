//! Storage layer for kvmodel
//!
//! This crate defines the store seam and ships one backend:
//! - [`Store`]: batched command execution, one round trip per batch
//! - [`Command`], [`Batch`], [`Reply`]: the finite command surface
//! - [`MemoryStore`]: DashMap-backed store with Redis reply semantics
//! - [`StoreConfig`]: backend settings, loadable from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod error;
pub mod memory;
pub mod reply;
pub mod traits;

pub use command::{Batch, Command};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use reply::Reply;
pub use traits::Store;
