//! Client for the AMIE account management protocol and the XSEDE usage API.
//!
//! The packet model lives in the `packets` crate and the usage model in the
//! `usage` crate; both are re-exported here next to the HTTP clients.

mod client;
mod config;
mod error;
mod http;
mod usage_client;

#[cfg(test)]
mod test_server;

pub use client::{AmieClient, PacketFilter};
pub use config::{
    AmieConfig, DEFAULT_AMIE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USAGE_URL,
    Timeouts,
};
pub use error::{ClientError, ErrorCode};
pub use http::{API_KEY_HEADER, SITE_HEADER};
pub use usage_client::UsageClient;

pub use packets;
pub use usage;
