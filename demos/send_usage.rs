//! Report two finished jobs to the usage API and print what it rejected.

use amieclient::usage::{ComputeAttributes, ComputeUsageRecord, UsageMessage, UsageRecord};
use amieclient::{AmieConfig, UsageClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let jobs: [UsageRecord; 2] = ["8001.sched", "8002.sched"].map(|id| {
        ComputeUsageRecord {
            username: "jdoe".into(),
            local_project_id: "p-tg-dem210001".into(),
            local_record_id: id.into(),
            resource: "bridges2.psc.xsede.org".into(),
            submit_time: "2021-03-01T10:00:00Z".into(),
            start_time: "2021-03-01T10:05:00Z".into(),
            end_time: "2021-03-01T12:05:00Z".into(),
            charge: 256.0,
            attributes: ComputeAttributes {
                node_count: 2,
                cpu_core_count: Some(256),
                queue: Some("RM".into()),
                ..ComputeAttributes::default()
            },
            parent_record_id: None,
        }
        .into()
    });
    let message = UsageMessage::new(Vec::from(jobs))?;

    let client = UsageClient::from_config(&AmieConfig::from_env()?)?;
    for response in client.send(&message).await? {
        for failed in &response.validation_failed_records {
            warn!(record = %failed.record, error = %failed.error, "usage record rejected");
        }
    }

    let status = client.status(None, None).await?;
    for resource in &status.resources {
        info!(
            resource = %resource.resource_name,
            loaded = resource.loaded_record_count,
            failed = resource.failed_record_count,
            "usage status"
        );
    }
    Ok(())
}
