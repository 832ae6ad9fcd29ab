//! Usage messages: homogeneous batches of usage records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{UsageError, UsageRecord};

/// Records per POST to the usage API.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UsageType {
    Compute,
    Storage,
    Adjustment,
}

impl UsageType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Adjustment => "Adjustment",
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageType {
    type Err = UsageError;

    /// Case-insensitive: `compute`, `COMPUTE` and `Compute` are all accepted.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "compute" => Ok(Self::Compute),
            "storage" => Ok(Self::Storage),
            "adjustment" => Ok(Self::Adjustment),
            _ => Err(UsageError::InvalidUsageType(raw.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for UsageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A batch of usage records that all share one [`UsageType`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageMessage {
    usage_type: UsageType,
    records: Vec<UsageRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMessage {
    usage_type: UsageType,
    records: Vec<Value>,
}

impl UsageMessage {
    /// # Errors
    ///
    /// Returns [`UsageError::Empty`] for no records and
    /// [`UsageError::MixedTypes`] when the records' types differ.
    pub fn new(records: Vec<UsageRecord>) -> Result<Self, UsageError> {
        let Some(first) = records.first() else {
            return Err(UsageError::Empty);
        };
        let usage_type = first.usage_type();
        if let Some(odd) = records.iter().find(|record| record.usage_type() != usage_type) {
            return Err(UsageError::MixedTypes {
                expected: usage_type,
                found: odd.usage_type(),
            });
        }
        Ok(Self { usage_type, records })
    }

    #[must_use]
    pub fn usage_type(&self) -> UsageType {
        self.usage_type
    }

    #[must_use]
    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record of the message's type.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MixedTypes`] and leaves the message unchanged
    /// when the record's type differs.
    pub fn push(&mut self, record: impl Into<UsageRecord>) -> Result<(), UsageError> {
        let record = record.into();
        if record.usage_type() != self.usage_type {
            return Err(UsageError::MixedTypes {
                expected: self.usage_type,
                found: record.usage_type(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Split into messages of at most `size` records, preserving order.
    /// A `size` of zero is treated as one.
    pub fn chunked(&self, size: usize) -> impl Iterator<Item = Self> + '_ {
        self.records.chunks(size.max(1)).map(|chunk| Self {
            usage_type: self.usage_type,
            records: chunk.to_vec(),
        })
    }

    /// # Errors
    ///
    /// Returns [`UsageError::Json`] if a record cannot be represented as JSON.
    pub fn as_dict(&self) -> Result<Value, UsageError> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    ///
    /// Same as [`UsageMessage::as_dict`].
    pub fn json(&self) -> Result<String, UsageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns [`UsageError::Json`] for a malformed document, record or usage
    /// type, and [`UsageError::Empty`] when there are no records.
    pub fn from_dict(value: Value) -> Result<Self, UsageError> {
        let wire: WireMessage = serde_json::from_value(value)?;
        let records = wire
            .records
            .into_iter()
            .map(|record| UsageRecord::from_value(wire.usage_type, record))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// # Errors
    ///
    /// Same as [`UsageMessage::from_dict`].
    pub fn from_json(text: &str) -> Result<Self, UsageError> {
        Self::from_dict(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
