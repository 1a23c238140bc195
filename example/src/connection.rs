use std::env::var;
use maxadmin::{Config, Connection, Result};
use tracing::info;

pub async fn main() -> Result<()> {
    let mut conn = Connection::connect_env().await?;

    let servers = conn.list_servers().await?;
    for server in &servers {
        info!(name = %server.name, address = %server.address, "listed");
    }

    let json = conn.show_servers().await?;
    info!("show serversjson: {}", String::from_utf8_lossy(&json));

    if let Ok(address) = var("MAXSCALE_LOOKUP_ADDRESS") {
        match servers.find_address(&address) {
            Some(name) => info!("{address} is {name}"),
            None => info!("{address} not found"),
        }
    }

    conn.close().await?;

    // a wrong password is reported, never retried
    let config = Config::from_env().password("definitely wrong");
    if let Err(err) = Connection::connect_with(config).await {
        info!("expected failure: {err}");
    }

    Ok(())
}
