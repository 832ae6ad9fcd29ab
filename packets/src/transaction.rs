//! Transaction — the packets exchanged for one account/project/person change.
//!
//! Packets correlate by record ID: every reply carries the `packet_rec_id` of
//! the packet it answers in `in_reply_to`, and all of them share the
//! transaction's `trans_rec_id`.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{Packet, PacketError};

const DATA_TYPE: &str = "transaction";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: Option<i64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "originating_site_name", default)]
    pub originating_site: Option<String>,
    #[serde(rename = "local_site_name", default)]
    pub local_site: Option<String>,
    #[serde(rename = "remote_site_name", default)]
    pub remote_site: Option<String>,
    /// Packets in the order the service returned them (oldest first).
    #[serde(rename = "DATA", default)]
    pub packets: Vec<Packet>,
}

impl Transaction {
    /// # Errors
    ///
    /// Returns [`PacketError::Json`] when the document does not have the
    /// transaction layout or any packet fails to parse.
    pub fn from_dict(value: Value) -> Result<Self, PacketError> {
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// Same as [`Transaction::from_dict`].
    pub fn from_json(text: &str) -> Result<Self, PacketError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn as_dict(&self) -> Value {
        serde_json::json!({
            "DATA_TYPE": DATA_TYPE,
            "transaction_id": self.transaction_id,
            "state": self.state,
            "originating_site_name": self.originating_site,
            "local_site_name": self.local_site,
            "remote_site_name": self.remote_site,
            "DATA": self.packets.iter().map(Packet::as_dict).collect::<Vec<_>>(),
        })
    }

    #[must_use]
    pub fn json(&self) -> String {
        self.as_dict().to_string()
    }

    /// Most recent packet of the transaction.
    #[must_use]
    pub fn last_packet(&self) -> Option<&Packet> {
        self.packets.last()
    }

    #[must_use]
    pub fn find_packet(&self, packet_rec_id: i64) -> Option<&Packet> {
        self.packets
            .iter()
            .find(|packet| packet.packet_rec_id == Some(packet_rec_id))
    }

    /// Packets answering `packet`. Empty when `packet` has no record ID yet.
    pub fn replies_to<'a>(&'a self, packet: &Packet) -> impl Iterator<Item = &'a Packet> + use<'a> {
        let parent = packet.packet_rec_id;
        self.packets
            .iter()
            .filter(move |candidate| parent.is_some() && candidate.in_reply_to == parent)
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_dict().serialize(serializer)
    }
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;
