//! Core types for kvmodel
//!
//! This crate defines the pieces every other layer agrees on:
//! - [`Value`]: the in-memory field value model
//! - [`key`]: deterministic storage key derivation
//! - [`ConvertError`]: wire conversion failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod value;

pub use error::{ConvertError, ConvertResult};
pub use key::{aux_key, record_key, KEY_SEPARATOR};
pub use value::Value;
