//! Build a `request_project_create` from scratch and send it.

use amieclient::packets::{Packet, PacketType};
use amieclient::{AmieClient, AmieConfig};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let today = OffsetDateTime::now_utc().date();
    let request = Packet::new(PacketType::RequestProjectCreate)
        .with("AllocationType", "new")?
        .with("GrantNumber", "TG-DEM210001")?
        .with("PfosNumber", "3")?
        .with("PiFirstName", "Jessica")?
        .with("PiLastName", "Scienceperson")?
        .with("PiOrganization", "Pittsburgh Supercomputing Center")?
        .with("PiOrgCode", "0032425")?
        .with("StartDate", today.to_string())?
        .with("EndDate", (today + Duration::days(90)).to_string())?
        .with("ResourceList", json!(["bridges2.psc.xsede.org"]))?
        .with("ServiceUnitsAllocated", "50000")?;

    let client = AmieClient::from_config(&AmieConfig::from_env()?)?;
    let ack = client.send_packet(&request, false).await?;
    info!(%ack, "project request sent");
    Ok(())
}
