//! Store commands
//!
//! The finite command surface the record layer needs. Each variant maps to
//! one Redis command of the same name.

/// A single store command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `HGET key field`
    HGet {
        /// Hash key
        key: String,
        /// Hash field
        field: String,
    },
    /// `HSET key field value`
    HSet {
        /// Hash key
        key: String,
        /// Hash field
        field: String,
        /// Wire value
        value: Vec<u8>,
    },
    /// `HEXISTS key field`
    HExists {
        /// Hash key
        key: String,
        /// Hash field
        field: String,
    },
    /// `LRANGE key start stop`
    LRange {
        /// List key
        key: String,
        /// First index, negative counts from the end
        start: i64,
        /// Last index (inclusive), negative counts from the end
        stop: i64,
    },
    /// `RPUSH key value`
    RPush {
        /// List key
        key: String,
        /// Element appended at the tail
        value: Vec<u8>,
    },
    /// `SMEMBERS key`
    SMembers {
        /// Set key
        key: String,
    },
    /// `SADD key member`
    SAdd {
        /// Set key
        key: String,
        /// Member to add
        member: Vec<u8>,
    },
    /// `DEL key`
    Del {
        /// Key to remove
        key: String,
    },
    /// `EXISTS key`
    Exists {
        /// Key to test
        key: String,
    },
}

impl Command {
    /// Upper-case command name
    pub fn name(&self) -> &'static str {
        match self {
            Command::HGet { .. } => "HGET",
            Command::HSet { .. } => "HSET",
            Command::HExists { .. } => "HEXISTS",
            Command::LRange { .. } => "LRANGE",
            Command::RPush { .. } => "RPUSH",
            Command::SMembers { .. } => "SMEMBERS",
            Command::SAdd { .. } => "SADD",
            Command::Del { .. } => "DEL",
            Command::Exists { .. } => "EXISTS",
        }
    }

    /// Key the command addresses
    pub fn key(&self) -> &str {
        match self {
            Command::HGet { key, .. }
            | Command::HSet { key, .. }
            | Command::HExists { key, .. }
            | Command::LRange { key, .. }
            | Command::RPush { key, .. }
            | Command::SMembers { key }
            | Command::SAdd { key, .. }
            | Command::Del { key }
            | Command::Exists { key } => key,
        }
    }
}

/// Ordered commands sent in one round trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Commands in issuance order
    pub commands: Vec<Command>,
    /// Apply atomically (MULTI/EXEC semantics)
    pub transaction: bool,
}

impl Batch {
    /// Plain batch
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            transaction: false,
        }
    }

    /// Atomic batch
    pub fn transaction(commands: Vec<Command>) -> Self {
        Self {
            commands,
            transaction: true,
        }
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when no command is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
