use serde::{Deserialize, Serialize};

use crate::{Packet, PacketError};

/// Packets returned by a list query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PacketList {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "result", default)]
    pub packets: Vec<Packet>,
}

impl PacketList {
    /// # Errors
    ///
    /// Returns [`PacketError::Json`] when the document does not have the list
    /// layout or any packet fails to parse.
    pub fn from_dict(value: serde_json::Value) -> Result<Self, PacketError> {
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// Same as [`PacketList::from_dict`].
    pub fn from_json(text: &str) -> Result<Self, PacketError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn as_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "result": self.packets.iter().map(Packet::as_dict).collect::<Vec<_>>(),
        })
    }

    #[must_use]
    pub fn json(&self) -> String {
        self.as_dict().to_string()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Packet> {
        self.packets.iter()
    }
}

impl IntoIterator for PacketList {
    type Item = Packet;
    type IntoIter = std::vec::IntoIter<Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.into_iter()
    }
}

impl<'a> IntoIterator for &'a PacketList {
    type Item = &'a Packet;
    type IntoIter = std::slice::Iter<'a, Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.iter()
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
