//! AMIE packet client.
//!
//! Each operation is a single request/response exchange with the AMIE REST
//! API. Failures surface to the caller as [`ClientError`]; nothing retries.

use packets::{Packet, PacketList, Transaction};
use reqwest::Method;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::config::AmieConfig;
use crate::http::{Api, parse_json};
use crate::ClientError;

// =============================================================================
// FILTER
// =============================================================================

/// Search parameters for [`AmieClient::list_packets`]. Unset fields are left
/// out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PacketFilter {
    pub trans_rec_ids: Vec<i64>,
    /// Only packets this site sent.
    pub outgoing: Option<bool>,
    /// Only packets this site received.
    pub incoming: Option<bool>,
    pub update_time_start: Option<OffsetDateTime>,
    pub update_time_until: Option<OffsetDateTime>,
    pub states: Vec<String>,
    pub client_states: Vec<String>,
}

impl PacketFilter {
    /// Incoming packets still waiting on this site.
    #[must_use]
    pub fn incoming() -> Self {
        Self { incoming: Some(true), ..Self::default() }
    }

    /// Query parameters in the AMIE wire form: lists comma-joined, the update
    /// window as `start,until` with either side blank.
    ///
    /// # Errors
    ///
    /// [`ClientError::TimeFormat`] when a bound cannot be rendered as RFC 3339.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, ClientError> {
        let mut pairs = Vec::new();
        if let Some(ids) = join_list(&self.trans_rec_ids) {
            pairs.push(("trans_rec_id", ids));
        }
        if let Some(outgoing) = self.outgoing {
            pairs.push(("outgoing", outgoing.to_string()));
        }
        if let Some(window) = update_window(self.update_time_start, self.update_time_until)? {
            pairs.push(("update_time", window));
        }
        if let Some(states) = join_list(&self.states) {
            pairs.push(("states", states));
        }
        if let Some(client_states) = join_list(&self.client_states) {
            pairs.push(("client_states", client_states));
        }
        if let Some(incoming) = self.incoming {
            pairs.push(("incoming", incoming.to_string()));
        }
        Ok(pairs)
    }
}

/// `start,until` in RFC 3339 with either side blank; `None` when both are.
fn update_window(
    start: Option<OffsetDateTime>,
    until: Option<OffsetDateTime>,
) -> Result<Option<String>, ClientError> {
    if start.is_none() && until.is_none() {
        return Ok(None);
    }
    Ok(Some(format!("{},{}", format_bound(start)?, format_bound(until)?)))
}

fn join_list<T: ToString>(items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(ToString::to_string).collect::<Vec<_>>().join(","))
}

fn format_bound(bound: Option<OffsetDateTime>) -> Result<String, ClientError> {
    match bound {
        Some(at) => Ok(at.format(&Rfc3339)?),
        None => Ok(String::new()),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct AmieClient {
    api: Api,
    site_name: String,
}

impl AmieClient {
    /// Client for `site_name` against the production AMIE endpoint.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidHeader`] when the site name or key is not a valid
    /// header value, [`ClientError::Http`] when the HTTP client cannot be built.
    pub fn new(site_name: &str, api_key: &str) -> Result<Self, ClientError> {
        Self::from_config(&AmieConfig::new(site_name, api_key))
    }

    /// # Errors
    ///
    /// Same as [`AmieClient::new`].
    pub fn from_config(config: &AmieConfig) -> Result<Self, ClientError> {
        let api = Api::new(&config.amie_url, &config.site_name, &config.api_key, config.timeouts)?;
        Ok(Self { api, site_name: config.site_name.clone() })
    }

    #[must_use]
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Base URL, always ending with `/`.
    #[must_use]
    pub fn amie_url(&self) -> &str {
        self.api.base_url()
    }

    /// Send a packet, validating it first unless `skip_validation`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Packet`] when validation fails (nothing is sent), and
    /// the transport/response errors of any request.
    pub async fn send_packet(&self, packet: &Packet, skip_validation: bool) -> Result<Value, ClientError> {
        if !skip_validation {
            packet.validate_data()?;
        }
        let text = self
            .api
            .call(Method::POST, &["packets", &self.site_name], &[], Some(&packet.as_dict()))
            .await?;
        info!(
            packet_type = %packet.packet_type(),
            trans_rec_id = ?packet.trans_rec_id,
            "packet sent"
        );
        parse_json(&text)
    }

    /// # Errors
    ///
    /// Transport/response errors, or [`ClientError::Packet`] when the body is
    /// not a packet.
    pub async fn get_packet(&self, packet_rec_id: i64) -> Result<Packet, ClientError> {
        let id = packet_rec_id.to_string();
        let text = self
            .api
            .call(Method::GET, &["packets", &self.site_name, &id], &[], None)
            .await?;
        Ok(Packet::from_json(&text)?)
    }

    /// Packets of one transaction, optionally only those updated inside
    /// `[update_time_start, update_time_until]`. Either bound may be open.
    ///
    /// # Errors
    ///
    /// [`ClientError::TimeFormat`] for an unrenderable time bound,
    /// transport/response errors, or [`ClientError::Packet`] when the body is
    /// not a transaction.
    pub async fn get_transaction(
        &self,
        trans_rec_id: i64,
        update_time_start: Option<OffsetDateTime>,
        update_time_until: Option<OffsetDateTime>,
    ) -> Result<Transaction, ClientError> {
        let mut query = Vec::new();
        if let Some(window) = update_window(update_time_start, update_time_until)? {
            query.push(("update_time", window));
        }
        let id = trans_rec_id.to_string();
        let text = self
            .api
            .call(Method::GET, &["transactions", &self.site_name, &id, "packets"], &query, None)
            .await?;
        Ok(Transaction::from_json(&text)?)
    }

    /// # Errors
    ///
    /// [`ClientError::TimeFormat`] for an unrenderable time bound, otherwise
    /// as [`AmieClient::get_packet`].
    pub async fn list_packets(&self, filter: &PacketFilter) -> Result<PacketList, ClientError> {
        let query = filter.query_pairs()?;
        let text = self
            .api
            .call(Method::GET, &["packets", &self.site_name], &query, None)
            .await?;
        let list = PacketList::from_json(&text)?;
        info!(count = list.len(), "packets listed");
        Ok(list)
    }

    /// Record this site's own processing state on a packet.
    ///
    /// # Errors
    ///
    /// [`ClientError::MissingRecordId`] for a packet the server has not stored
    /// yet, otherwise transport/response errors.
    pub async fn set_packet_client_state(&self, packet: &Packet, state: &str) -> Result<(), ClientError> {
        let id = record_id(packet)?;
        self.api
            .call(Method::PUT, &["packets", &self.site_name, &id, "client_state", state], &[], None)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`AmieClient::set_packet_client_state`].
    pub async fn clear_packet_client_state(&self, packet: &Packet) -> Result<(), ClientError> {
        let id = record_id(packet)?;
        self.api
            .call(Method::DELETE, &["packets", &self.site_name, &id, "client_state"], &[], None)
            .await?;
        Ok(())
    }

    /// Attach arbitrary JSON to a packet for this site's bookkeeping.
    ///
    /// # Errors
    ///
    /// Same as [`AmieClient::set_packet_client_state`].
    pub async fn set_packet_client_json(&self, packet: &Packet, value: &Value) -> Result<(), ClientError> {
        let id = record_id(packet)?;
        self.api
            .call(Method::PUT, &["packets", &self.site_name, &id, "client_json"], &[], Some(value))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`AmieClient::set_packet_client_state`].
    pub async fn clear_packet_client_json(&self, packet: &Packet) -> Result<(), ClientError> {
        let id = record_id(packet)?;
        self.api
            .call(Method::DELETE, &["packets", &self.site_name, &id, "client_json"], &[], None)
            .await?;
        Ok(())
    }
}

fn record_id(packet: &Packet) -> Result<String, ClientError> {
    packet
        .packet_rec_id
        .map(|id| id.to_string())
        .ok_or(ClientError::MissingRecordId)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
