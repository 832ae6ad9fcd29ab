//! Client errors and the error-code classification shared by every crate in
//! the workspace.

use packets::PacketError;
use usage::UsageError;

/// Stable, grepable code plus a retry hint for an error.
///
/// Classification only: nothing in this crate retries on its own.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced by [`crate::AmieClient`] and [`crate::UsageClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required environment variable is not set.
    #[error("missing config: env var {var} not set")]
    MissingConfig { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The site name or API key cannot be sent as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Building the HTTP client or the request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The packet failed validation or the response was not a packet.
    #[error(transparent)]
    Packet(#[from] PacketError),

    /// The usage message or response was invalid.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A timestamp could not be rendered for a query parameter.
    #[error("time format failed: {0}")]
    TimeFormat(#[from] time::error::Format),

    /// The operation needs a packet the server has already assigned an ID.
    #[error("packet has no packet_rec_id")]
    MissingRecordId,
}

impl ErrorCode for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingConfig { .. } => "E_MISSING_CONFIG",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Http(_) => "E_HTTP",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::Packet(err) => err.error_code(),
            Self::Usage(err) => err.error_code(),
            Self::Json(_) => "E_API_PARSE",
            Self::TimeFormat(_) => "E_TIME_FORMAT",
            Self::MissingRecordId => "E_MISSING_RECORD_ID",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

impl ErrorCode for PacketError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPacketType(_) => "E_UNKNOWN_PACKET_TYPE",
            Self::MissingField { .. } => "E_MISSING_FIELD",
            Self::DisallowedField { .. } => "E_DISALLOWED_FIELD",
            Self::InvalidField { .. } => "E_INVALID_FIELD",
            Self::EitherField { .. } => "E_EITHER_FIELD",
            Self::NoReplyExpected(_) => "E_NO_REPLY_EXPECTED",
            Self::UnexpectedReply { .. } => "E_UNEXPECTED_REPLY",
            Self::Malformed(_) => "E_MALFORMED_PACKET",
            Self::Json(_) => "E_PACKET_JSON",
        }
    }
}

impl ErrorCode for UsageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUsageType(_) => "E_INVALID_USAGE_TYPE",
            Self::MixedTypes { .. } => "E_MIXED_USAGE_TYPES",
            Self::Empty => "E_EMPTY_USAGE_MESSAGE",
            Self::Json(_) => "E_USAGE_JSON",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
