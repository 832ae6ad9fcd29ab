//! Usage records, one accounting entry each.
//!
//! Times are kept as the strings the site's scheduler or storage system
//! produced; the usage API parses them on arrival.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{UsageError, UsageType};

/// A finished job on a compute resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputeUsageRecord {
    /// Local username; must match the login known to AMIE.
    pub username: String,
    /// Site project ID; must match the `ProjectID` the site reported to AMIE.
    #[serde(rename = "LocalProjectID")]
    pub local_project_id: String,
    /// Site job ID, typically the scheduler's.
    #[serde(rename = "LocalRecordID")]
    pub local_record_id: String,
    /// Resource name as registered with AMIE.
    pub resource: String,
    pub submit_time: String,
    pub start_time: String,
    pub end_time: String,
    /// Allocation units to deduct from the project.
    pub charge: f64,
    pub attributes: ComputeAttributes,
    /// Job ID of the parent job when this record is a sub job.
    #[serde(rename = "ParentRecordID", default, skip_serializing_if = "Option::is_none")]
    pub parent_record_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputeAttributes {
    pub node_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_core_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    /// Peak memory in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

/// A storage usage snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageUsageRecord {
    pub username: String,
    #[serde(rename = "LocalProjectID")]
    pub local_project_id: String,
    #[serde(rename = "LocalRecordID")]
    pub local_record_id: String,
    pub resource: String,
    pub collection_time: String,
    pub charge: f64,
    #[serde(default)]
    pub attributes: StorageAttributes,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_read: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_stored: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
    /// Seconds between collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_read: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_written: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_copies: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_copies: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentType {
    Credit,
    Debit,
    Refund,
    Reservation,
    StorageCredit,
    StorageDebit,
}

/// A manual change to a project's balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdjustmentUsageRecord {
    pub adjustment_type: AdjustmentType,
    pub username: String,
    #[serde(rename = "LocalProjectID")]
    pub local_project_id: String,
    #[serde(rename = "LocalRecordID")]
    pub local_record_id: String,
    pub resource: String,
    pub start_time: String,
    pub charge: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Any usage record. Serializes as the bare record; the type travels on the
/// enclosing message.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UsageRecord {
    Compute(ComputeUsageRecord),
    Storage(StorageUsageRecord),
    Adjustment(AdjustmentUsageRecord),
}

impl UsageRecord {
    #[must_use]
    pub fn usage_type(&self) -> UsageType {
        match self {
            Self::Compute(_) => UsageType::Compute,
            Self::Storage(_) => UsageType::Storage,
            Self::Adjustment(_) => UsageType::Adjustment,
        }
    }

    #[must_use]
    pub fn local_record_id(&self) -> &str {
        match self {
            Self::Compute(record) => &record.local_record_id,
            Self::Storage(record) => &record.local_record_id,
            Self::Adjustment(record) => &record.local_record_id,
        }
    }

    /// Parse a bare record of a known type.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::Json`] when the value does not match the record
    /// layout for `usage_type`.
    pub fn from_value(usage_type: UsageType, value: Value) -> Result<Self, UsageError> {
        Ok(match usage_type {
            UsageType::Compute => Self::Compute(serde_json::from_value(value)?),
            UsageType::Storage => Self::Storage(serde_json::from_value(value)?),
            UsageType::Adjustment => Self::Adjustment(serde_json::from_value(value)?),
        })
    }
}

impl From<ComputeUsageRecord> for UsageRecord {
    fn from(record: ComputeUsageRecord) -> Self {
        Self::Compute(record)
    }
}

impl From<StorageUsageRecord> for UsageRecord {
    fn from(record: StorageUsageRecord) -> Self {
        Self::Storage(record)
    }
}

impl From<AdjustmentUsageRecord> for UsageRecord {
    fn from(record: AdjustmentUsageRecord) -> Self {
        Self::Adjustment(record)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
