//! Raw store replies

/// One raw reply, positionally matched to the command that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing stored (missing key or hash field)
    Nil,
    /// Integer reply (counts, booleans)
    Integer(i64),
    /// Binary-safe string
    Bulk(Vec<u8>),
    /// Multi-bulk reply
    Array(Vec<Vec<u8>>),
    /// Per-command failure
    Error(String),
}

impl Reply {
    /// Reply kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk",
            Reply::Array(_) => "array",
            Reply::Error(_) => "error",
        }
    }

    /// Check if this reply is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Check if this reply is a command error
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}
