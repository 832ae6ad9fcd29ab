use crate::PacketType;

/// Errors produced while building, parsing or validating packets.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The `type` tag does not name a known AMIE packet type.
    #[error("unknown packet type: {0}")]
    UnknownPacketType(String),

    /// A required body field is absent or null.
    #[error("missing required data field {field} for packet type {packet_type}")]
    MissingField { packet_type: PacketType, field: String },

    /// A body field is outside the packet type's schema.
    #[error("invalid data key \"{field}\" for packet type {packet_type}")]
    DisallowedField { packet_type: PacketType, field: String },

    /// A body field is present but its value is not acceptable.
    #[error("invalid value for {field} on packet type {packet_type}: {message}")]
    InvalidField {
        packet_type: PacketType,
        field: String,
        message: String,
    },

    /// Neither of two alternative fields was provided.
    #[error("Must provide either {first} or {second}")]
    EitherField { first: &'static str, second: &'static str },

    /// A reply was requested for a packet type that expects none.
    #[error("packet type {0} does not expect a reply")]
    NoReplyExpected(PacketType),

    /// The requested reply type is not one the packet expects.
    #[error("{reply} is not an expected reply to {packet_type}")]
    UnexpectedReply {
        packet_type: PacketType,
        reply: PacketType,
    },

    /// The JSON document does not have the packet layout.
    #[error("malformed packet: {0}")]
    Malformed(String),

    /// The input is not valid JSON.
    #[error("invalid packet JSON: {0}")]
    Json(#[from] serde_json::Error),
}
