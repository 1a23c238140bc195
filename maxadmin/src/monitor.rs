//! Server status snapshot from the monitoring endpoint.
//!
//! The endpoint answers a `GET` with a json array of servers. Every
//! successful fetch replaces the whole [`Snapshot`], readers holding an
//! older [`Arc<Snapshot>`] keep a consistent view.
use std::sync::{Arc, PoisonError, RwLock};
#[cfg(feature = "monitor")]
use std::time::Duration;

use serde::Deserialize;

use crate::{Result, common::debug};

#[cfg(feature = "monitor")]
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A server as reported by the monitoring endpoint.
///
/// Fields accept both the lower case and the capitalized key. Missing keys
/// decode to their default value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerStatus {
    /// Server name.
    #[serde(alias = "Server")]
    pub server: String,
    #[serde(alias = "Address")]
    pub address: String,
    #[serde(alias = "Port")]
    pub port: u16,
    /// Current client connections.
    #[serde(alias = "Connections")]
    pub connections: u64,
    #[serde(alias = "Status")]
    pub status: String,
}

/// Servers of one monitor response, in response order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    servers: Vec<ServerStatus>,
}

impl Snapshot {
    /// Decode a json array of servers.
    pub fn decode(body: &[u8]) -> Result<Snapshot> {
        let servers = serde_json::from_slice(body)?;
        Ok(Snapshot { servers })
    }

    pub fn into_vec(self) -> Vec<ServerStatus> {
        self.servers
    }
}

impl std::ops::Deref for Snapshot {
    type Target = [ServerStatus];

    fn deref(&self) -> &Self::Target {
        &self.servers
    }
}

/// Holds the latest [`Snapshot`].
///
/// Starts empty. A failed fetch or decode leaves the current snapshot as
/// is.
pub struct Monitor {
    #[cfg(feature = "monitor")]
    client: reqwest::Client,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Monitor {
    /// Create monitor with 10 seconds request timeout.
    pub fn new() -> Result<Monitor> {
        #[cfg(feature = "monitor")]
        {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        #[cfg(not(feature = "monitor"))]
        {
            Ok(Self { snapshot: RwLock::default() })
        }
    }

    /// Create monitor with given request timeout.
    #[cfg(feature = "monitor")]
    pub fn with_timeout(timeout: Duration) -> Result<Monitor> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, snapshot: RwLock::default() })
    }

    /// Create monitor with given http client.
    #[cfg(feature = "monitor")]
    pub fn with_client(client: reqwest::Client) -> Monitor {
        Self { client, snapshot: RwLock::default() }
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshot)
    }

    /// Decode `body` and replace the snapshot.
    pub fn load(&self, body: &[u8]) -> Result<Arc<Snapshot>> {
        let snapshot = match Snapshot::decode(body) {
            Ok(ok) => Arc::new(ok),
            Err(err) => {
                debug!("snapshot kept, {err}");
                return Err(err);
            }
        };
        self.replace(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// `GET` the monitoring endpoint and replace the snapshot.
    #[cfg(feature = "monitor")]
    pub async fn fetch(&self, url: &str) -> Result<Arc<Snapshot>> {
        debug!("fetching {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        self.load(&body)
    }

    /// First server at `address` and `port` in the latest snapshot.
    pub fn find(&self, address: &str, port: u16) -> Option<crate::lookup::ServerInfo> {
        self.snapshot().find(address, port)
    }

    fn replace(&self, snapshot: Arc<Snapshot>) {
        debug!("snapshot replaced, {} servers", snapshot.len());
        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *current = snapshot;
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("servers", &self.snapshot().len())
            .finish()
    }
}
