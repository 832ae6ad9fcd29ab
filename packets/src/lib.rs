//! AMIE packet model shared by the client and its consumers.
//!
//! This crate owns the wire representation of every AMIE packet type. Packet
//! bodies stay flexible (`serde_json::Map`) while each packet type fixes the
//! set of keys it requires and allows, so validation is a schema lookup
//! rather than a per-type struct.

mod error;
mod kind;
mod list;
mod packet;
mod schema;
mod transaction;

pub use error::PacketError;
pub use kind::{ExpectedReply, PacketType, REPLY_TIMEOUT_MINUTES};
pub use list::PacketList;
pub use packet::{Body, Packet};
pub use schema::PacketSchema;
pub use transaction::Transaction;
