//! Usage reporting model for the XSEDE usage API.
//!
//! Sites report consumption as usage messages: a batch of records that all
//! share one usage type. The API answers each batch with a response listing
//! the records it rejected.

mod error;
mod message;
mod record;
mod response;

pub use error::UsageError;
pub use message::{DEFAULT_CHUNK_SIZE, UsageMessage, UsageType};
pub use record::{
    AdjustmentType, AdjustmentUsageRecord, ComputeAttributes, ComputeUsageRecord,
    StorageAttributes, StorageUsageRecord, UsageRecord,
};
pub use response::{UsageRecordError, UsageResponse, UsageStatus, UsageStatusError, UsageStatusResource};
