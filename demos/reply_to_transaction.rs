//! Answer the latest packet of one transaction with its default reply.
//!
//! Usage: `cargo run --example reply_to_transaction -- <trans_rec_id>`

use amieclient::{AmieClient, AmieConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let trans_rec_id: i64 = std::env::args()
        .nth(1)
        .ok_or("usage: reply_to_transaction <trans_rec_id>")?
        .parse()?;

    let client = AmieClient::from_config(&AmieConfig::from_env()?)?;
    let transaction = client.get_transaction(trans_rec_id, None, None).await?;
    let latest = transaction.last_packet().ok_or("transaction has no packets")?;

    // The reply copies the correlation header and any carried-over fields;
    // the service fills in the rest from the request.
    let reply = latest.reply_packet()?;
    client.send_packet(&reply, true).await?;
    info!(
        trans_rec_id,
        request = %latest.packet_type(),
        reply = %reply.packet_type(),
        "replied to transaction"
    );
    Ok(())
}
