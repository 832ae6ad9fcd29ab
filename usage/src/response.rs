//! Usage API responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::UsageError;

/// Answer to a usage POST, and the shape of the failed-records listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub validation_failed_records: Vec<UsageRecordError>,
}

impl UsageResponse {
    /// # Errors
    ///
    /// Returns [`UsageError::Json`] when the body is not a usage response.
    pub fn from_json(text: &str) -> Result<Self, UsageError> {
        Ok(serde_json::from_str(text)?)
    }

    /// True when the service rejected no records.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.validation_failed_records.is_empty()
    }
}

/// A rejected record, echoed back as sent, with the reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageRecordError {
    pub record: Value,
    pub error: String,
}

/// Load summary per resource over a date range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageStatus {
    #[serde(default)]
    pub resources: Vec<UsageStatusResource>,
}

impl UsageStatus {
    /// # Errors
    ///
    /// Returns [`UsageError::Json`] when the body is not a status document.
    pub fn from_json(text: &str) -> Result<Self, UsageError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&UsageStatusResource> {
        self.resources.iter().find(|resource| resource.resource_name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageStatusResource {
    pub resource_name: String,
    #[serde(default)]
    pub loaded_record_count: u64,
    #[serde(default)]
    pub failed_record_count: u64,
    #[serde(default)]
    pub errors: Vec<UsageStatusError>,
}

/// One distinct failure message and how many records hit it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageStatusError {
    pub error_message: String,
    #[serde(default)]
    pub record_count: u64,
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
