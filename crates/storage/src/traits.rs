//! The store seam
//!
//! The record layer never talks to a concrete client. It sends ordered
//! [`Batch`]es through [`Store::execute`] and reads back one [`Reply`] per
//! command. The helper methods run a single command per round trip and are
//! meant for inspection and tests, not for the record layer.

use crate::command::{Batch, Command};
use crate::error::{StoreError, StoreResult};
use crate::reply::Reply;

/// A key-value store client with a batching primitive
///
/// # Contract
///
/// - `execute` performs exactly one round trip
/// - The returned replies match `batch.commands` one-to-one and in order
/// - A failing command yields `Reply::Error` at its position; the batch
///   itself only fails (`Err`) when the round trip cannot happen
/// - `batch.transaction` requests atomic application; the store decides
///   how to honor it, the caller performs no rollback
pub trait Store: Send + Sync {
    /// Execute a batch in one round trip
    fn execute(&self, batch: Batch) -> StoreResult<Vec<Reply>>;

    /// `HGET`, `None` when the key or field is missing
    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<Vec<u8>>> {
        let command = Command::HGet {
            key: key.to_string(),
            field: field.to_string(),
        };
        match run_one(self, command)? {
            Reply::Nil => Ok(None),
            Reply::Bulk(value) => Ok(Some(value)),
            other => Err(unexpected("HGET", &other)),
        }
    }

    /// `HSET`, returns `true` when the field is new
    fn hset(&self, key: &str, field: &str, value: &[u8]) -> StoreResult<bool> {
        let command = Command::HSet {
            key: key.to_string(),
            field: field.to_string(),
            value: value.to_vec(),
        };
        integer(run_one(self, command)?, "HSET").map(|n| n > 0)
    }

    /// `HEXISTS`
    fn hexists(&self, key: &str, field: &str) -> StoreResult<bool> {
        let command = Command::HExists {
            key: key.to_string(),
            field: field.to_string(),
        };
        integer(run_one(self, command)?, "HEXISTS").map(|n| n > 0)
    }

    /// `LRANGE`
    fn lrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<Vec<u8>>> {
        let command = Command::LRange {
            key: key.to_string(),
            start,
            stop,
        };
        array(run_one(self, command)?, "LRANGE")
    }

    /// `RPUSH`, returns the new list length
    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<i64> {
        let command = Command::RPush {
            key: key.to_string(),
            value: value.to_vec(),
        };
        integer(run_one(self, command)?, "RPUSH")
    }

    /// `SMEMBERS`, in no particular order
    fn smembers(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        let command = Command::SMembers {
            key: key.to_string(),
        };
        array(run_one(self, command)?, "SMEMBERS")
    }

    /// `SADD`, returns `true` when the member is new
    fn sadd(&self, key: &str, member: &[u8]) -> StoreResult<bool> {
        let command = Command::SAdd {
            key: key.to_string(),
            member: member.to_vec(),
        };
        integer(run_one(self, command)?, "SADD").map(|n| n > 0)
    }

    /// `DEL`, returns `true` when the key existed
    fn del(&self, key: &str) -> StoreResult<bool> {
        let command = Command::Del {
            key: key.to_string(),
        };
        integer(run_one(self, command)?, "DEL").map(|n| n > 0)
    }

    /// `EXISTS`
    fn exists(&self, key: &str) -> StoreResult<bool> {
        let command = Command::Exists {
            key: key.to_string(),
        };
        integer(run_one(self, command)?, "EXISTS").map(|n| n > 0)
    }
}

fn run_one<S: Store + ?Sized>(store: &S, command: Command) -> StoreResult<Reply> {
    let name = command.name();
    let reply = store
        .execute(Batch::new(vec![command]))?
        .into_iter()
        .next()
        .ok_or(StoreError::UnexpectedReply {
            command: name,
            actual: "empty",
        })?;
    match reply {
        Reply::Error(message) => Err(StoreError::Command {
            command: name,
            message,
        }),
        reply => Ok(reply),
    }
}

fn unexpected(command: &'static str, reply: &Reply) -> StoreError {
    StoreError::UnexpectedReply {
        command,
        actual: reply.kind(),
    }
}

fn integer(reply: Reply, command: &'static str) -> StoreResult<i64> {
    match reply {
        Reply::Integer(n) => Ok(n),
        other => Err(unexpected(command, &other)),
    }
}

fn array(reply: Reply, command: &'static str) -> StoreResult<Vec<Vec<u8>>> {
    match reply {
        Reply::Array(items) => Ok(items),
        Reply::Nil => Ok(Vec::new()),
        other => Err(unexpected(command, &other)),
    }
}
