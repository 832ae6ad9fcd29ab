//! Work through every incoming packet waiting on this site.
//!
//! Project requests get a `notify_project_create` naming the local project
//! and PI login; project data packets close the transaction with a success
//! `inform_transaction_complete`. Everything else is logged and left alone.
//!
//! Reads `AMIE_SITE_NAME`, `AMIE_API_KEY` and friends from the environment or
//! a `.env` file.

use amieclient::packets::{Packet, PacketType};
use amieclient::{AmieClient, AmieConfig, PacketFilter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = AmieClient::from_config(&AmieConfig::from_env()?)?;
    let packets = client.list_packets(&PacketFilter::incoming()).await?;

    for packet in &packets {
        let reply = match packet.packet_type() {
            PacketType::RequestProjectCreate => notify_project_created(packet)?,
            PacketType::DataProjectCreate => transaction_complete(packet)?,
            other => {
                warn!(packet_type = %other, packet_rec_id = ?packet.packet_rec_id, "no handler, skipping");
                continue;
            }
        };
        client.send_packet(&reply, false).await?;
        client.set_packet_client_state(packet, "replied").await?;
        info!(
            packet_type = %packet.packet_type(),
            reply_type = %reply.packet_type(),
            trans_rec_id = ?packet.trans_rec_id,
            "packet answered"
        );
    }
    Ok(())
}

fn notify_project_created(request: &Packet) -> Result<Packet, Box<dyn std::error::Error>> {
    let grant = request.get_str("GrantNumber").unwrap_or("unknown");
    let pi = request.get_str("PiLastName").unwrap_or("pi").to_lowercase();

    // Look up or create the project and PI in the site database here.
    let project_id = format!("p-{}", grant.to_lowercase());
    let pi_person_id = request.get_str("PiPersonID").map_or_else(|| format!("u-{pi}"), str::to_string);
    let pi_login = request.get_str("PiRemoteSiteLogin").map_or_else(|| pi.clone(), str::to_string);

    Ok(request
        .reply_packet()?
        .with("ProjectID", project_id)?
        .with("PiPersonID", pi_person_id)?
        .with("PiRemoteSiteLogin", pi_login)?)
}

fn transaction_complete(data: &Packet) -> Result<Packet, Box<dyn std::error::Error>> {
    Ok(data
        .reply_packet()?
        .with("StatusCode", "Success")?
        .with("DetailCode", "1")?
        .with("Message", "OK")?)
}
