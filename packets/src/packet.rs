//! Packet — one typed message in an AMIE transaction.
//!
//! DESIGN
//! ======
//! A packet is a `PacketType` tag, a header of correlation and routing
//! fields, and a flat body. The body only ever holds keys from the type's
//! schema; anything else found on an incoming packet is parked in
//! `additional_data` so parsing never loses data and validation can still
//! reject it before the packet goes back out.
//!
//! Wire layout:
//!
//! ```json
//! {"DATA_TYPE": "Packet", "type": "request_project_create",
//!  "header": {"packet_rec_id": 1, "trans_rec_id": 2, "...": null},
//!  "body": {"GrantNumber": "TG-ABC123", "...": null}}
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::kind::{ExpectedReply, PacketType};
use crate::schema::PacketSchema;
use crate::PacketError;

/// Flat key-value payload of a packet.
pub type Body = Map<String, Value>;

const DATA_TYPE: &str = "Packet";
const ACTION_TYPES: [&str; 3] = ["add", "delete", "replace"];

/// A single AMIE packet.
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    packet_type: PacketType,
    /// Server-assigned record ID of this packet.
    pub packet_rec_id: Option<i64>,
    /// Server-assigned record ID of the transaction this packet belongs to.
    pub trans_rec_id: Option<i64>,
    /// Packet sequence number within its transaction.
    pub packet_id: Option<i64>,
    /// Transaction number as assigned by the originating site.
    pub transaction_id: Option<i64>,
    /// `packet_rec_id` of the packet this one answers.
    pub in_reply_to: Option<i64>,
    pub local_site_name: Option<String>,
    pub remote_site_name: Option<String>,
    pub originating_site_name: Option<String>,
    pub outgoing_flag: Option<bool>,
    pub packet_state: Option<String>,
    pub packet_timestamp: Option<String>,
    /// Free-form processing state a site attaches to a packet.
    pub client_state: Option<String>,
    /// Free-form JSON a site attaches to a packet.
    pub client_json: Option<Value>,
    body: Body,
    additional_data: Body,
}

impl Packet {
    /// Create an empty outgoing packet of the given type.
    #[must_use]
    pub fn new(packet_type: PacketType) -> Self {
        Self {
            packet_type,
            packet_rec_id: None,
            trans_rec_id: None,
            packet_id: None,
            transaction_id: None,
            in_reply_to: None,
            local_site_name: None,
            remote_site_name: None,
            originating_site_name: None,
            outgoing_flag: None,
            packet_state: None,
            packet_timestamp: None,
            client_state: None,
            client_json: None,
            body: Body::new(),
            additional_data: Body::new(),
        }
    }

    /// Create a packet from a field mapping.
    ///
    /// Only checks that every key belongs to the schema; required keys are
    /// checked by [`Packet::validate_data`].
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::DisallowedField`] for the first key outside the
    /// packet type's schema.
    pub fn from_fields(packet_type: PacketType, fields: Body) -> Result<Self, PacketError> {
        let mut packet = Self::new(packet_type);
        for (key, value) in fields {
            packet.set(key, value)?;
        }
        Ok(packet)
    }

    #[must_use]
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    #[must_use]
    pub fn schema(&self) -> &'static PacketSchema {
        self.packet_type.schema()
    }

    #[must_use]
    pub fn expected_replies(&self) -> &'static [ExpectedReply] {
        self.packet_type.expected_replies()
    }

    /// Schema fields carried in the body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Fields outside the schema found on an incoming packet.
    #[must_use]
    pub fn additional_data(&self) -> &Body {
        &self.additional_data
    }

    /// `true` when this packet answers another packet.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.in_reply_to.is_some()
    }

    /// Look up a field in the body, falling back to `additional_data`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body
            .get(key)
            .or_else(|| self.additional_data.get(key))
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a schema field.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::DisallowedField`] when `key` is not part of the
    /// packet type's schema.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), PacketError> {
        let key = key.into();
        if !self.schema().is_permitted(&key) {
            return Err(PacketError::DisallowedField {
                packet_type: self.packet_type,
                field: key,
            });
        }
        self.body.insert(key, value.into());
        Ok(())
    }

    /// Builder form of [`Packet::set`].
    ///
    /// # Errors
    ///
    /// Same as [`Packet::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self, PacketError> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Remove a field from the body or `additional_data`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.body
            .remove(key)
            .or_else(|| self.additional_data.remove(key))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Check the packet against its schema and type-specific rules.
    ///
    /// Required keys listed in the schema's `not_required_in_reply` are
    /// waived when the packet is a reply.
    ///
    /// # Errors
    ///
    /// - [`PacketError::DisallowedField`] when `additional_data` is not empty.
    /// - [`PacketError::MissingField`] when a required key is absent or null.
    /// - [`PacketError::EitherField`] / [`PacketError::InvalidField`] for
    ///   type-specific rules.
    pub fn validate_data(&self) -> Result<(), PacketError> {
        if let Some(field) = self.additional_data.keys().next() {
            return Err(PacketError::DisallowedField {
                packet_type: self.packet_type,
                field: field.clone(),
            });
        }

        let schema = self.schema();
        let is_reply = self.is_reply();
        for key in schema.required {
            if schema.is_required(key, is_reply) && !self.has_value(key) {
                return Err(PacketError::MissingField {
                    packet_type: self.packet_type,
                    field: (*key).to_owned(),
                });
            }
        }

        self.validate_type_rules()
    }

    /// [`Packet::validate_data`] as a boolean.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate_data().is_ok()
    }

    fn has_value(&self, key: &str) -> bool {
        self.body.get(key).is_some_and(|value| !value.is_null())
    }

    fn validate_type_rules(&self) -> Result<(), PacketError> {
        match self.packet_type {
            PacketType::NotifyPersonDuplicate => {
                self.require_either("GlobalID1", "PersonID1")?;
                self.require_either("GlobalID2", "PersonID2")
            }
            PacketType::NotifyUserModify | PacketType::RequestUserModify => {
                self.validate_action_type()
            }
            _ => Ok(()),
        }
    }

    fn require_either(&self, first: &'static str, second: &'static str) -> Result<(), PacketError> {
        if self.has_value(first) || self.has_value(second) {
            return Ok(());
        }
        Err(PacketError::EitherField { first, second })
    }

    fn validate_action_type(&self) -> Result<(), PacketError> {
        let Some(value) = self.body.get("ActionType").filter(|value| !value.is_null()) else {
            return Ok(());
        };
        match value.as_str() {
            Some(action) if ACTION_TYPES.contains(&action) => Ok(()),
            _ => Err(PacketError::InvalidField {
                packet_type: self.packet_type,
                field: "ActionType".to_owned(),
                message: format!("expected one of add, delete, replace; got {value}"),
            }),
        }
    }

    // =========================================================================
    // REPLIES
    // =========================================================================

    /// Build a reply of this packet's first expected reply type.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::NoReplyExpected`] when the packet type expects
    /// no reply (e.g. `inform_transaction_complete`).
    pub fn reply_packet(&self) -> Result<Self, PacketError> {
        let Some(expected) = self.expected_replies().first() else {
            return Err(PacketError::NoReplyExpected(self.packet_type));
        };
        self.reply_packet_as(expected.packet_type, false)
    }

    /// Build a reply of a specific type.
    ///
    /// The reply joins this packet's transaction, points `in_reply_to` at this
    /// packet, and copies the body fields the reply type may omit because the
    /// service carries them over.
    ///
    /// # Errors
    ///
    /// Unless `force` is set, returns [`PacketError::NoReplyExpected`] or
    /// [`PacketError::UnexpectedReply`] when `reply_type` is not expected.
    pub fn reply_packet_as(&self, reply_type: PacketType, force: bool) -> Result<Self, PacketError> {
        if !force && !self.packet_type.expects(reply_type) {
            if self.expected_replies().is_empty() {
                return Err(PacketError::NoReplyExpected(self.packet_type));
            }
            return Err(PacketError::UnexpectedReply {
                packet_type: self.packet_type,
                reply: reply_type,
            });
        }

        let mut reply = Self::new(reply_type);
        reply.trans_rec_id = self.trans_rec_id;
        reply.transaction_id = self.transaction_id;
        reply.in_reply_to = self.packet_rec_id;
        reply.local_site_name.clone_from(&self.local_site_name);
        reply.remote_site_name.clone_from(&self.remote_site_name);
        reply.originating_site_name.clone_from(&self.originating_site_name);

        for key in reply_type.schema().not_required_in_reply {
            if let Some(value) = self.body.get(*key) {
                reply.body.insert((*key).to_owned(), value.clone());
            }
        }
        Ok(reply)
    }

    // =========================================================================
    // WIRE
    // =========================================================================

    /// The JSON object representation of this packet.
    #[must_use]
    pub fn as_dict(&self) -> Value {
        let expected_reply_list: Vec<Value> = self
            .expected_replies()
            .iter()
            .map(|expected| {
                serde_json::json!({
                    "type": expected.packet_type.as_str(),
                    "timeout": expected.timeout,
                })
            })
            .collect();

        let mut header = Map::new();
        header.insert("packet_rec_id".to_owned(), self.packet_rec_id.into());
        header.insert("trans_rec_id".to_owned(), self.trans_rec_id.into());
        header.insert("packet_id".to_owned(), self.packet_id.into());
        header.insert("transaction_id".to_owned(), self.transaction_id.into());
        header.insert("in_reply_to".to_owned(), self.in_reply_to.into());
        header.insert("local_site_name".to_owned(), self.local_site_name.clone().into());
        header.insert("remote_site_name".to_owned(), self.remote_site_name.clone().into());
        header.insert(
            "originating_site_name".to_owned(),
            self.originating_site_name.clone().into(),
        );
        header.insert("outgoing_flag".to_owned(), self.outgoing_flag.into());
        header.insert("packet_state".to_owned(), self.packet_state.clone().into());
        header.insert("packet_timestamp".to_owned(), self.packet_timestamp.clone().into());
        header.insert("client_state".to_owned(), self.client_state.clone().into());
        header.insert("client_json".to_owned(), self.client_json.clone().into());
        header.insert("expected_reply_list".to_owned(), Value::Array(expected_reply_list));

        let mut body = self.body.clone();
        body.extend(self.additional_data.clone());

        let mut out = Map::new();
        out.insert("DATA_TYPE".to_owned(), Value::String(DATA_TYPE.to_owned()));
        out.insert("type".to_owned(), Value::String(self.packet_type.as_str().to_owned()));
        out.insert("header".to_owned(), Value::Object(header));
        out.insert("body".to_owned(), Value::Object(body));
        Value::Object(out)
    }

    /// The JSON text representation of this packet.
    #[must_use]
    pub fn json(&self) -> String {
        self.as_dict().to_string()
    }

    /// Parse a packet from its JSON object representation.
    ///
    /// Dispatches on `type`; body keys outside the schema are kept in
    /// `additional_data`.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Malformed`] when `type`, `header` or `body` is
    /// missing or a header field has the wrong JSON type, and
    /// [`PacketError::UnknownPacketType`] for an unknown tag.
    pub fn from_dict(value: Value) -> Result<Self, PacketError> {
        let Value::Object(mut object) = value else {
            return Err(PacketError::Malformed("packet is not a JSON object".to_owned()));
        };
        let packet_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| PacketError::Malformed("missing packet type".to_owned()))?
            .parse::<PacketType>()?;
        let Some(Value::Object(header)) = object.remove("header") else {
            return Err(PacketError::Malformed("missing packet header".to_owned()));
        };
        let Some(Value::Object(fields)) = object.remove("body") else {
            return Err(PacketError::Malformed("missing packet body".to_owned()));
        };

        let schema = packet_type.schema();
        let mut body = Body::new();
        let mut additional_data = Body::new();
        for (key, value) in fields {
            if schema.is_permitted(&key) {
                body.insert(key, value);
            } else {
                additional_data.insert(key, value);
            }
        }

        Ok(Self {
            packet_type,
            packet_rec_id: header_id(&header, "packet_rec_id")?,
            trans_rec_id: header_id(&header, "trans_rec_id")?,
            packet_id: header_id(&header, "packet_id")?,
            transaction_id: header_id(&header, "transaction_id")?,
            in_reply_to: header_id(&header, "in_reply_to")?,
            local_site_name: header_text(&header, "local_site_name")?,
            remote_site_name: header_text(&header, "remote_site_name")?,
            originating_site_name: header_text(&header, "originating_site_name")?,
            outgoing_flag: header_flag(&header, "outgoing_flag")?,
            packet_state: header_text(&header, "packet_state")?,
            packet_timestamp: header_text(&header, "packet_timestamp")?,
            client_state: header_text(&header, "client_state")?,
            client_json: header.get("client_json").filter(|v| !v.is_null()).cloned(),
            body,
            additional_data,
        })
    }

    /// Parse a packet from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Json`] for invalid JSON, otherwise as
    /// [`Packet::from_dict`].
    pub fn from_json(text: &str) -> Result<Self, PacketError> {
        Self::from_dict(serde_json::from_str(text)?)
    }
}

/// Record IDs arrive as JSON integers; integer strings are accepted too.
fn header_id(header: &Body, key: &str) -> Result<Option<i64>, PacketError> {
    match header.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| PacketError::Malformed(format!("{key} is not an integer"))),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| PacketError::Malformed(format!("{key} is not an integer"))),
        Some(_) => Err(PacketError::Malformed(format!("{key} is not an integer"))),
    }
}

fn header_text(header: &Body, key: &str) -> Result<Option<String>, PacketError> {
    match header.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(PacketError::Malformed(format!("{key} is not a string"))),
    }
}

fn header_flag(header: &Body, key: &str) -> Result<Option<bool>, PacketError> {
    match header.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(PacketError::Malformed(format!("{key} is not a boolean"))),
    }
}

impl Serialize for Packet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Packet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_dict(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "packet_test.rs"]
mod tests;
