//! Deferred results
//!
//! A [`Deferred`] is handed out the moment a command is queued and filled in
//! by [`crate::Pipeline::execute`]. It has three observable states:
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Unresolved` | pipeline not executed yet, or halted before this command |
//! | `Missing` | the store replied nil |
//! | `Value(T)` | the store replied with data |
//!
//! The slot is write-once: after the executor resolves it, it never changes.

use crate::error::{PipelineError, PipelineResult};
use kvmodel_storage::Reply;
use once_cell::sync::OnceCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Decoding from a raw reply into the type a command promises
pub trait FromReply: Sized {
    /// Reply kind expected, for error messages
    const EXPECTED: &'static str;

    /// Decode a non-nil, non-error reply
    fn from_reply(reply: &Reply) -> Option<Self>;
}

impl FromReply for Vec<u8> {
    const EXPECTED: &'static str = "bulk";

    fn from_reply(reply: &Reply) -> Option<Self> {
        match reply {
            Reply::Bulk(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }
}

impl FromReply for Vec<Vec<u8>> {
    const EXPECTED: &'static str = "array";

    fn from_reply(reply: &Reply) -> Option<Self> {
        match reply {
            Reply::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl FromReply for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_reply(reply: &Reply) -> Option<Self> {
        match reply {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromReply for bool {
    const EXPECTED: &'static str = "integer";

    fn from_reply(reply: &Reply) -> Option<Self> {
        match reply {
            Reply::Integer(n) => Some(*n != 0),
            _ => None,
        }
    }
}

/// Observable state of a [`Deferred`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Not resolved yet
    Unresolved,
    /// Resolved, the store had nothing
    Missing,
    /// Resolved with a value
    Value(T),
}

impl<T> Resolution<T> {
    /// True for `Missing` and `Value`
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    /// The value, if resolved with one
    pub fn into_value(self) -> Option<T> {
        match self {
            Resolution::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Write-once slot shared by a pipeline and the deferred it handed out
pub(crate) type Slot = Arc<OnceCell<Reply>>;

/// Placeholder for the reply of one queued command
pub struct Deferred<T> {
    slot: Slot,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FromReply> Deferred<T> {
    pub(crate) fn new(slot: Slot) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Check whether the executor has resolved this result
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Current state, decoding the reply if there is one
    pub fn resolution(&self) -> PipelineResult<Resolution<T>> {
        match self.slot.get() {
            None => Ok(Resolution::Unresolved),
            Some(Reply::Nil) => Ok(Resolution::Missing),
            Some(reply) => T::from_reply(reply)
                .map(Resolution::Value)
                .ok_or(PipelineError::UnexpectedReply {
                    expected: T::EXPECTED,
                    actual: reply.kind(),
                }),
        }
    }

    /// The resolved value; `None` when the store replied nil
    ///
    /// Reading before execution is an error rather than `None`, so an
    /// unexecuted pipeline can never pass for missing data.
    pub fn value(&self) -> PipelineResult<Option<T>> {
        match self.resolution()? {
            Resolution::Unresolved => Err(PipelineError::Unresolved),
            Resolution::Missing => Ok(None),
            Resolution::Value(v) => Ok(Some(v)),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            None => write!(f, "Deferred(<unresolved>)"),
            Some(reply) => write!(f, "Deferred({:?})", reply),
        }
    }
}
