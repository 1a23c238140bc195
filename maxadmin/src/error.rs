//! `maxadmin` error types.
use std::{backtrace::Backtrace, borrow::Cow, fmt, io, str::Utf8Error};

use crate::{
    connection::{AuthenticationError, NegotiationError, ParseError},
    net::ConnectError,
};

/// A specialized [`Result`] type for `maxadmin` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All possible error from `maxadmin` library.
pub struct Error {
    context: Cow<'static, str>,
    backtrace: Backtrace,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Returns `true` if the connection that produced this error can not be
    /// used anymore and the caller should reconnect.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Connection(_)
                | ErrorKind::Read(_)
                | ErrorKind::Io(_)
                | ErrorKind::Negotiation(_)
                | ErrorKind::Authentication(_)
                | ErrorKind::CommandInFlight
        )
    }

    pub(crate) fn read(err: io::Error) -> Error {
        ErrorKind::Read(err).into()
    }

    pub(crate) fn context(mut self, context: impl Into<Cow<'static, str>>) -> Error {
        self.context = context.into();
        self
    }
}

/// All possible error kind from `maxadmin` library.
pub enum ErrorKind {
    /// Malformed configuration url.
    Config(ParseError),
    /// Failed to dial the admin port.
    Connection(ConnectError),
    /// Failed to read from the stream, including end of stream and read timeout.
    Read(io::Error),
    /// Failed to write to the stream.
    Io(io::Error),
    /// Handshake frame with unexpected length.
    Negotiation(NegotiationError),
    /// Credentials rejected.
    Authentication(AuthenticationError),
    /// A command is still waiting for its response.
    CommandInFlight,
    Utf8(Utf8Error),
    /// Failed to request the monitor endpoint.
    #[cfg(feature = "monitor")]
    Request(reqwest::Error),
    /// Malformed monitor json.
    Decode(serde_json::Error),
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for Error {
            fn from($pat: $ty) -> Self {
                let backtrace = std::backtrace::Backtrace::capture();
                Self { context: Cow::Borrowed(""), backtrace, kind: $body }
            }
        }
    };
}

from!(<ErrorKind>e => e);
from!(<ParseError>e => ErrorKind::Config(e));
from!(<ConnectError>e => ErrorKind::Connection(e));
from!(<io::Error>e => ErrorKind::Io(e));
from!(<NegotiationError>e => ErrorKind::Negotiation(e));
from!(<AuthenticationError>e => ErrorKind::Authentication(e));
from!(<Utf8Error>e => ErrorKind::Utf8(e));
#[cfg(feature = "monitor")]
from!(<reqwest::Error>e => ErrorKind::Request(e));
from!(<serde_json::Error>e => ErrorKind::Decode(e));

impl std::error::Error for Error { }

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.context.is_empty() {
            write!(f, "{}: ", self.context)?;
        }

        fmt::Display::fmt(&self.kind, f)?;

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let mut backtrace = self.backtrace.to_string();
            write!(f, "\n\n")?;
            writeln!(f, "Stack backtrace:")?;
            backtrace.truncate(backtrace.trim_end().len());
            write!(f, "{}", backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl std::error::Error for ErrorKind { }

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => fmt::Display::fmt(e, f),
            Self::Connection(e) => fmt::Display::fmt(e, f),
            Self::Read(e) => write!(f, "error reading from stream: {e}"),
            Self::Io(e) => fmt::Display::fmt(e, f),
            Self::Negotiation(e) => fmt::Display::fmt(e, f),
            Self::Authentication(e) => fmt::Display::fmt(e, f),
            Self::CommandInFlight => f.write_str("a command is already awaiting its response"),
            Self::Utf8(e) => fmt::Display::fmt(e, f),
            #[cfg(feature = "monitor")]
            Self::Request(e) => write!(f, "monitor request failed: {e}"),
            Self::Decode(e) => write!(f, "failed to decode monitor response: {e}"),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
