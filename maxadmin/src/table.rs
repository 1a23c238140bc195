//! `list servers` table.
//!
//! The admin interface prints servers as a pipe delimited table:
//!
//! ```text
//! Servers.
//! -------------------+-----------------+-------+-------------+--------------------
//! Server             | Address         | Port  | Connections | Status
//! -------------------+-----------------+-------+-------------+--------------------
//! server1            | 10.0.0.1        |  3306 |           2 | Master, Running
//! ```
//!
//! Parsing is a best effort scrape, not a grammar. Every line that starts
//! with `name | address |` yields a record, any other line (title,
//! separators, trailing text) is dropped silently.
use std::sync::LazyLock;

use regex::Regex;

use crate::common::ByteStr;

/// `name | address |` at the start of a line.
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z._:-]+)\s*\|\s*([0-9A-Za-z._:-]+)\s*\|\s*").unwrap()
});

/// First column of the header row.
const HEADER: &str = "Server";

/// A server row of the `list servers` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerRecord {
    pub name: ByteStr,
    pub address: ByteStr,
}

/// Servers in the order they were listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerList {
    servers: Vec<ServerRecord>,
}

impl ServerList {
    /// Parse a response, records are slices of `payload`.
    pub fn parse(payload: ByteStr) -> ServerList {
        let servers = payload
            .lines()
            .filter_map(|line| ROW.captures(line))
            .filter_map(|captures| {
                let (_, [name, address]) = captures.extract();
                (name != HEADER).then(|| ServerRecord {
                    name: payload.slice_ref(name),
                    address: payload.slice_ref(address),
                })
            })
            .collect();
        ServerList { servers }
    }

    pub fn into_vec(self) -> Vec<ServerRecord> {
        self.servers
    }
}

/// Parse a `list servers` response.
pub fn parse_server_list(payload: &str) -> ServerList {
    ServerList::parse(ByteStr::copy_from_str(payload))
}

impl std::ops::Deref for ServerList {
    type Target = [ServerRecord];

    fn deref(&self) -> &Self::Target {
        &self.servers
    }
}

impl IntoIterator for ServerList {
    type Item = ServerRecord;
    type IntoIter = std::vec::IntoIter<ServerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.into_iter()
    }
}

impl<'a> IntoIterator for &'a ServerList {
    type Item = &'a ServerRecord;
    type IntoIter = std::slice::Iter<'a, ServerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.iter()
    }
}
