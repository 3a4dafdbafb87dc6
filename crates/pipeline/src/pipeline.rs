//! Command pipeline
//!
//! Queues store commands, sends them in exactly one round trip, and resolves
//! the [`Deferred`] handed out for each command in issuance order.
//!
//! ## Execution Sequence
//!
//! ```text
//! 1. hget/hset/... - queue a command, hand back an unresolved Deferred
//! 2. execute()     - one Store::execute call with every queued command
//! 3. walk replies in order:
//!      error at k  -> stop; [0,k) resolved, [k,end) stay unresolved
//!      otherwise   -> resolve slot k
//! 4. return the raw replies
//! ```
//!
//! `execute` takes the pipeline by value, so a pipeline runs at most once
//! and cannot be shared by two operations.
//!
//! ## Example
//!
//! ```ignore
//! let mut p = Pipeline::new(&store);
//! let name = p.hget("User::1", "name");
//! let tags = p.smembers("User::1::tags");
//! p.execute()?;
//! println!("{:?} {:?}", name.value()?, tags.value()?);
//! ```

use crate::error::{PipelineError, PipelineResult};
use crate::promise::{Deferred, FromReply, Slot};
use kvmodel_storage::{Batch, Command, Reply, Store};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// A batch of queued commands bound to one store
pub struct Pipeline<'s> {
    store: &'s dyn Store,
    commands: Vec<Command>,
    slots: Vec<Slot>,
    transaction: bool,
}

impl<'s> Pipeline<'s> {
    /// Plain pipeline: commands apply in order, not atomically
    pub fn new(store: &'s dyn Store) -> Self {
        Self {
            store,
            commands: Vec::new(),
            slots: Vec::new(),
            transaction: false,
        }
    }

    /// Transaction pipeline: atomic application is requested from the store
    pub fn transaction(store: &'s dyn Store) -> Self {
        Self {
            transaction: true,
            ..Self::new(store)
        }
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when atomic application was requested
    pub fn is_transaction(&self) -> bool {
        self.transaction
    }

    /// Queued commands in issuance order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn queue<T: FromReply>(&mut self, command: Command) -> Deferred<T> {
        let slot: Slot = Arc::new(OnceCell::new());
        self.commands.push(command);
        self.slots.push(Arc::clone(&slot));
        Deferred::new(slot)
    }

    // ========================================================================
    // Hash commands
    // ========================================================================

    /// Queue `HGET key field`
    pub fn hget(&mut self, key: &str, field: &str) -> Deferred<Vec<u8>> {
        self.queue(Command::HGet {
            key: key.to_string(),
            field: field.to_string(),
        })
    }

    /// Queue `HSET key field value`; resolves to `true` for a new field
    pub fn hset(&mut self, key: &str, field: &str, value: Vec<u8>) -> Deferred<bool> {
        self.queue(Command::HSet {
            key: key.to_string(),
            field: field.to_string(),
            value,
        })
    }

    /// Queue `HEXISTS key field`
    pub fn hexists(&mut self, key: &str, field: &str) -> Deferred<bool> {
        self.queue(Command::HExists {
            key: key.to_string(),
            field: field.to_string(),
        })
    }

    // ========================================================================
    // List commands
    // ========================================================================

    /// Queue `LRANGE key start stop`
    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Deferred<Vec<Vec<u8>>> {
        self.queue(Command::LRange {
            key: key.to_string(),
            start,
            stop,
        })
    }

    /// Queue `RPUSH key value`; resolves to the new length
    pub fn rpush(&mut self, key: &str, value: Vec<u8>) -> Deferred<i64> {
        self.queue(Command::RPush {
            key: key.to_string(),
            value,
        })
    }

    // ========================================================================
    // Set commands
    // ========================================================================

    /// Queue `SMEMBERS key`
    pub fn smembers(&mut self, key: &str) -> Deferred<Vec<Vec<u8>>> {
        self.queue(Command::SMembers {
            key: key.to_string(),
        })
    }

    /// Queue `SADD key member`; resolves to `true` for a new member
    pub fn sadd(&mut self, key: &str, member: Vec<u8>) -> Deferred<bool> {
        self.queue(Command::SAdd {
            key: key.to_string(),
            member,
        })
    }

    // ========================================================================
    // Key commands
    // ========================================================================

    /// Queue `DEL key`; resolves to `true` when the key existed
    pub fn del(&mut self, key: &str) -> Deferred<bool> {
        self.queue(Command::Del {
            key: key.to_string(),
        })
    }

    /// Queue `EXISTS key`
    pub fn exists(&mut self, key: &str) -> Deferred<bool> {
        self.queue(Command::Exists {
            key: key.to_string(),
        })
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run every queued command in one round trip and resolve the results
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Store`] when the round trip fails; nothing resolves
    /// - [`PipelineError::Command`] for the first failing command; earlier
    ///   results are resolved, it and later ones are not
    pub fn execute(self) -> PipelineResult<Vec<Reply>> {
        if self.commands.is_empty() {
            return Ok(Vec::new());
        }

        let Pipeline {
            store,
            commands,
            slots,
            transaction,
        } = self;
        let names: Vec<&'static str> = commands.iter().map(Command::name).collect();
        let count = commands.len();

        debug!(commands = count, transaction, "executing pipeline");

        let batch = Batch {
            commands,
            transaction,
        };
        let replies = store.execute(batch)?;
        if replies.len() != count {
            return Err(PipelineError::ReplyCountMismatch {
                commands: count,
                replies: replies.len(),
            });
        }

        for (position, (reply, slot)) in replies.iter().zip(slots.iter()).enumerate() {
            if let Reply::Error(message) = reply {
                debug!(position, command = names[position], "pipeline command failed");
                return Err(PipelineError::Command {
                    position,
                    command: names[position],
                    message: message.clone(),
                });
            }
            // Slots are fresh and private to this pipeline, so this is the only write
            let _ = slot.set(reply.clone());
        }
        Ok(replies)
    }
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("commands", &self.commands)
            .field("transaction", &self.transaction)
            .finish()
    }
}
