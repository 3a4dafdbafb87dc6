//! In-memory store with Redis reply semantics
//!
//! Keys live in a DashMap; each key holds one typed entry (hash, list or
//! set). Commands against a key of another type fail with `WRONGTYPE`, the
//! same way a Redis server answers.
//!
//! # Batches
//!
//! - Plain batches apply command by command. Other clients may interleave.
//! - Transaction batches take an exclusive gate for the whole batch, so no
//!   other command observes a half-applied batch. Like Redis `MULTI/EXEC`,
//!   a failing command does not undo the ones before it.
//!
//! # Example
//!
//! ```ignore
//! use kvmodel_storage::{MemoryStore, Store};
//!
//! let store = MemoryStore::new();
//! store.hset("User::1", "name", b"alice")?;
//! assert_eq!(store.hget("User::1", "name")?, Some(b"alice".to_vec()));
//! ```

use crate::command::{Batch, Command};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::reply::Reply;
use crate::traits::Store;
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// Value held under one key
#[derive(Debug, Clone)]
enum Entry {
    Hash(FxHashMap<String, Vec<u8>>),
    List(Vec<Vec<u8>>),
    Set(FxHashSet<Vec<u8>>),
}

/// In-memory [`Store`]
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - Single commands lock only the shard of the key they touch
/// - Transaction batches hold the write side of a gate; plain commands
///   hold its read side, so they never interleave with a transaction
pub struct MemoryStore {
    data: DashMap<String, Entry>,
    /// Serialises transaction batches against everything else
    gate: RwLock<()>,
    round_trips: AtomicU64,
    config: StoreConfig,
}

impl MemoryStore {
    /// Create a store with default settings
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with explicit settings
    pub fn with_config(config: StoreConfig) -> Self {
        if !config.transactions {
            warn!("transactions disabled; transaction batches will be rejected");
        }
        Self {
            data: DashMap::with_capacity(config.initial_capacity),
            gate: RwLock::new(()),
            round_trips: AtomicU64::new(0),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of `execute` calls served so far
    pub fn round_trips(&self) -> u64 {
        self.round_trips.load(Ordering::Acquire)
    }

    /// Number of keys currently stored
    pub fn key_count(&self) -> usize {
        self.data.len()
    }

    /// Remove every key
    pub fn flush_all(&self) {
        let _gate = self.gate.write();
        self.data.clear();
    }

    // ========================================================================
    // Command application
    // ========================================================================

    fn apply(&self, command: &Command) -> Reply {
        match command {
            Command::HGet { key, field } => match self.data.get(key) {
                None => Reply::Nil,
                Some(entry) => match entry.value() {
                    Entry::Hash(hash) => hash.get(field).cloned().map_or(Reply::Nil, Reply::Bulk),
                    _ => wrong_type(),
                },
            },
            Command::HSet { key, field, value } => {
                let mut entry = self
                    .data
                    .entry(key.clone())
                    .or_insert_with(|| Entry::Hash(FxHashMap::default()));
                match entry.value_mut() {
                    Entry::Hash(hash) => {
                        let added = hash.insert(field.clone(), value.clone()).is_none();
                        Reply::Integer(i64::from(added))
                    }
                    _ => wrong_type(),
                }
            }
            Command::HExists { key, field } => match self.data.get(key) {
                None => Reply::Integer(0),
                Some(entry) => match entry.value() {
                    Entry::Hash(hash) => Reply::Integer(i64::from(hash.contains_key(field))),
                    _ => wrong_type(),
                },
            },
            Command::LRange { key, start, stop } => match self.data.get(key) {
                None => Reply::Array(Vec::new()),
                Some(entry) => match entry.value() {
                    Entry::List(list) => Reply::Array(list_range(list, *start, *stop).to_vec()),
                    _ => wrong_type(),
                },
            },
            Command::RPush { key, value } => {
                let mut entry = self
                    .data
                    .entry(key.clone())
                    .or_insert_with(|| Entry::List(Vec::new()));
                match entry.value_mut() {
                    Entry::List(list) => {
                        list.push(value.clone());
                        Reply::Integer(list.len() as i64)
                    }
                    _ => wrong_type(),
                }
            }
            Command::SMembers { key } => match self.data.get(key) {
                None => Reply::Array(Vec::new()),
                Some(entry) => match entry.value() {
                    Entry::Set(set) => Reply::Array(set.iter().cloned().collect()),
                    _ => wrong_type(),
                },
            },
            Command::SAdd { key, member } => {
                let mut entry = self
                    .data
                    .entry(key.clone())
                    .or_insert_with(|| Entry::Set(FxHashSet::default()));
                match entry.value_mut() {
                    Entry::Set(set) => Reply::Integer(i64::from(set.insert(member.clone()))),
                    _ => wrong_type(),
                }
            }
            Command::Del { key } => Reply::Integer(i64::from(self.data.remove(key).is_some())),
            Command::Exists { key } => Reply::Integer(i64::from(self.data.contains_key(key))),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn execute(&self, batch: Batch) -> StoreResult<Vec<Reply>> {
        self.round_trips.fetch_add(1, Ordering::AcqRel);

        if let Some(max) = self.config.max_batch_len {
            if batch.len() > max {
                return Err(StoreError::BatchTooLarge {
                    len: batch.len(),
                    max,
                });
            }
        }
        if batch.transaction && !self.config.transactions {
            return Err(StoreError::TransactionsDisabled);
        }

        debug!(
            commands = batch.len(),
            transaction = batch.transaction,
            "memory store executing batch"
        );

        let replies = if batch.transaction {
            let _gate = self.gate.write();
            batch.commands.iter().map(|c| self.apply(c)).collect()
        } else {
            batch
                .commands
                .iter()
                .map(|c| {
                    let _gate = self.gate.read();
                    self.apply(c)
                })
                .collect()
        };
        Ok(replies)
    }
}

fn wrong_type() -> Reply {
    Reply::Error(WRONG_TYPE.to_string())
}

/// Redis `LRANGE` index arithmetic: negative indices count from the end,
/// out-of-range bounds are clamped, an inverted range is empty.
fn list_range(list: &[Vec<u8>], start: i64, stop: i64) -> &[Vec<u8>] {
    let len = list.len() as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return &[];
    }
    &list[start as usize..=stop as usize]
}
