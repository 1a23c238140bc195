//! Find a server by address.
//!
//! Neither form deduplicates, the first matching entry wins.
use crate::{
    monitor::{Snapshot, ServerStatus},
    table::ServerList,
};

/// Identity and health of a server found in a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub status: String,
    pub connections: u64,
}

impl From<&ServerStatus> for ServerInfo {
    fn from(server: &ServerStatus) -> Self {
        Self {
            name: server.server.clone(),
            status: server.status.clone(),
            connections: server.connections,
        }
    }
}

impl ServerList {
    /// Name of the first server listed with `address`.
    pub fn find_address(&self, address: &str) -> Option<&str> {
        self.iter()
            .find(|server| server.address == address)
            .map(|server| server.name.as_str())
    }
}

impl Snapshot {
    /// First server at exactly `address` and `port`.
    ///
    /// Absence is a valid outcome, not an error.
    pub fn find(&self, address: &str, port: u16) -> Option<ServerInfo> {
        self.iter()
            .find(|server| server.address == address && server.port == port)
            .map(ServerInfo::from)
    }
}
