//! Batched command pipeline for kvmodel
//!
//! This crate implements deferred-result execution:
//! - [`Pipeline`]: queue typed commands, execute them in one round trip
//! - [`Deferred`]: placeholder returned per command, resolved in issuance order
//! - [`Resolution`]: three-state view (unresolved, missing, value)
//!
//! The pipeline performs no rollback. Atomicity is whatever the store grants
//! to a transaction batch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pipeline;
pub mod promise;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use promise::{Deferred, FromReply, Resolution};
