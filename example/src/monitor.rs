use std::{env::var, sync::Arc};
use maxadmin::{Monitor, Result};
use tracing::{info, warn};

pub async fn main() -> Result<()> {
    let Ok(url) = var("MAXSCALE_MONITOR_URL") else {
        warn!("MAXSCALE_MONITOR_URL not set, skipping");
        return Ok(());
    };

    let monitor = Arc::new(Monitor::new()?);

    let handles = (0..4).map(|_| {
        let monitor = Arc::clone(&monitor);
        let url = url.clone();
        tokio::spawn(async move { monitor.fetch(&url).await.map(|s| s.len()) })
    });

    for h in handles {
        match h.await {
            Ok(Ok(len)) => info!("fetched {len} servers"),
            Ok(Err(err)) => warn!("fetch failed: {err}"),
            Err(err) => warn!("task failed: {err}"),
        }
    }

    for server in monitor.snapshot().iter() {
        let info = monitor.find(&server.address, server.port);
        info!(address = %server.address, port = server.port, ?info, "lookup");
    }

    Ok(())
}
