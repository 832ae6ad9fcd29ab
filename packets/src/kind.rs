//! Packet type tags and the reply chain between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PacketError;
use crate::schema::{self, PacketSchema};

/// Minutes the AMIE service waits for an expected reply (three weeks).
pub const REPLY_TIMEOUT_MINUTES: u32 = 30240;

/// Every packet type in the AMIE protocol, keyed by its wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketType {
    RequestAccountCreate,
    NotifyAccountCreate,
    DataAccountCreate,
    RequestAccountInactivate,
    NotifyAccountInactivate,
    RequestAccountReactivate,
    NotifyAccountReactivate,
    RequestProjectCreate,
    NotifyProjectCreate,
    DataProjectCreate,
    RequestProjectInactivate,
    NotifyProjectInactivate,
    RequestProjectReactivate,
    NotifyProjectReactivate,
    NotifyPersonDuplicate,
    NotifyPersonIds,
    RequestPersonMerge,
    NotifyUserModify,
    RequestUserModify,
    InformTransactionComplete,
}

/// One entry of a packet's `expected_reply_list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedReply {
    #[serde(rename = "type")]
    pub packet_type: PacketType,
    pub timeout: u32,
}

impl ExpectedReply {
    pub(crate) const fn of(packet_type: PacketType) -> Self {
        Self {
            packet_type,
            timeout: REPLY_TIMEOUT_MINUTES,
        }
    }
}

impl PacketType {
    pub const ALL: [Self; 20] = [
        Self::RequestAccountCreate,
        Self::NotifyAccountCreate,
        Self::DataAccountCreate,
        Self::RequestAccountInactivate,
        Self::NotifyAccountInactivate,
        Self::RequestAccountReactivate,
        Self::NotifyAccountReactivate,
        Self::RequestProjectCreate,
        Self::NotifyProjectCreate,
        Self::DataProjectCreate,
        Self::RequestProjectInactivate,
        Self::NotifyProjectInactivate,
        Self::RequestProjectReactivate,
        Self::NotifyProjectReactivate,
        Self::NotifyPersonDuplicate,
        Self::NotifyPersonIds,
        Self::RequestPersonMerge,
        Self::NotifyUserModify,
        Self::RequestUserModify,
        Self::InformTransactionComplete,
    ];

    /// Wire tag, e.g. `"request_project_create"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestAccountCreate => "request_account_create",
            Self::NotifyAccountCreate => "notify_account_create",
            Self::DataAccountCreate => "data_account_create",
            Self::RequestAccountInactivate => "request_account_inactivate",
            Self::NotifyAccountInactivate => "notify_account_inactivate",
            Self::RequestAccountReactivate => "request_account_reactivate",
            Self::NotifyAccountReactivate => "notify_account_reactivate",
            Self::RequestProjectCreate => "request_project_create",
            Self::NotifyProjectCreate => "notify_project_create",
            Self::DataProjectCreate => "data_project_create",
            Self::RequestProjectInactivate => "request_project_inactivate",
            Self::NotifyProjectInactivate => "notify_project_inactivate",
            Self::RequestProjectReactivate => "request_project_reactivate",
            Self::NotifyProjectReactivate => "notify_project_reactivate",
            Self::NotifyPersonDuplicate => "notify_person_duplicate",
            Self::NotifyPersonIds => "notify_person_ids",
            Self::RequestPersonMerge => "request_person_merge",
            Self::NotifyUserModify => "notify_user_modify",
            Self::RequestUserModify => "request_user_modify",
            Self::InformTransactionComplete => "inform_transaction_complete",
        }
    }

    /// Field schema for this packet type.
    #[must_use]
    pub fn schema(self) -> &'static PacketSchema {
        schema::lookup(self)
    }

    /// Reply types this packet expects, most likely first.
    #[must_use]
    pub fn expected_replies(self) -> &'static [ExpectedReply] {
        self.schema().expected_reply
    }

    /// `true` when `reply` is one of this packet's expected replies.
    #[must_use]
    pub fn expects(self, reply: Self) -> bool {
        self.expected_replies()
            .iter()
            .any(|expected| expected.packet_type == reply)
    }

    #[must_use]
    pub fn is_request(self) -> bool {
        self.as_str().starts_with("request_")
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PacketType {
    type Err = PacketError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| PacketError::UnknownPacketType(tag.to_owned()))
    }
}

#[cfg(test)]
#[path = "kind_test.rs"]
mod tests;
