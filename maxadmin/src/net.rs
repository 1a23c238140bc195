//! Admin port socket.
use std::{
    fmt, io,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{
    io::{AsyncRead, AsyncWrite, ReadBuf},
    net::TcpStream,
};

use crate::common::debug;

/// A tcp connection to the admin port, which implement
/// `AsyncRead` and `AsyncWrite` transparently.
pub struct Socket {
    tcp: TcpStream,
}

impl Socket {
    /// Dial `host:port`, giving up after `timeout`.
    pub async fn connect_tcp(host: &str, port: u16, timeout: Duration) -> Result<Socket, ConnectError> {
        debug!("connecting to {host}:{port}");

        let dial = TcpStream::connect((host, port));
        let tcp = match tokio::time::timeout(timeout, dial).await {
            Ok(Ok(tcp)) => tcp,
            Ok(Err(source)) => return Err(ConnectError::new(host, port, source)),
            Err(_) => {
                let source = io::Error::new(io::ErrorKind::TimedOut, format!("no response after {timeout:?}"));
                return Err(ConnectError::new(host, port, source));
            }
        };

        tcp.set_nodelay(true).map_err(|e| ConnectError::new(host, port, e))?;
        Ok(Socket { tcp })
    }
}

impl AsyncRead for Socket {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.tcp).poll_read(cx, buf)
    }
}

impl AsyncWrite for Socket {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.tcp).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.tcp).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.tcp).poll_shutdown(cx)
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tcp, f)
    }
}

/// Error when dialing the admin port.
pub struct ConnectError {
    address: String,
    source: io::Error,
}

impl ConnectError {
    fn new(host: &str, port: u16, source: io::Error) -> Self {
        Self { address: format!("{host}:{port}"), source }
    }

    /// The `host:port` that was dialed.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns `true` if the dial did not complete within the connect timeout.
    pub fn is_timeout(&self) -> bool {
        self.source.kind() == io::ErrorKind::TimedOut
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection failed to address {}: {}", self.address, self.source)
    }
}

impl fmt::Debug for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
