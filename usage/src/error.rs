use crate::UsageType;

/// Errors produced while building or parsing usage messages.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// The usage type is not `Compute`, `Storage` or `Adjustment`.
    #[error("invalid usage type {0}")]
    InvalidUsageType(String),

    /// A record's type differs from the rest of the message.
    #[error("can't add a {found} record to a {expected} message")]
    MixedTypes { expected: UsageType, found: UsageType },

    /// A usage message needs at least one record.
    #[error("usage message has no records")]
    Empty,

    /// The input is not valid JSON or does not match the record layout.
    #[error("invalid usage JSON: {0}")]
    Json(#[from] serde_json::Error),
}
