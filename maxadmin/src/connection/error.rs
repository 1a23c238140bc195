use std::fmt;

use super::Phase;

/// Handshake frame with unexpected length.
///
/// Frame length is the only validation the handshake has, a correct reply
/// at the wrong length is still rejected.
pub struct NegotiationError {
    pub(crate) phase: Phase,
    pub(crate) expect: usize,
    pub(crate) found: usize,
}

impl NegotiationError {
    /// The handshake phase the unexpected frame was read in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Expected frame length.
    pub fn expect(&self) -> usize {
        self.expect
    }

    /// Actual frame length.
    pub fn found(&self) -> usize {
        self.found
    }
}

impl std::error::Error for NegotiationError { }

impl fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "incorrect maxscale protocol negotiation: expected {} bytes found {} in `{}`",
            self.expect, self.found, self.phase,
        )
    }
}

impl fmt::Debug for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Server rejected the credentials.
pub struct AuthenticationError {
    pub(crate) user: String,
}

impl AuthenticationError {
    /// The user name that was rejected.
    pub fn user(&self) -> &str {
        &self.user
    }
}

impl std::error::Error for AuthenticationError { }

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authentication failed for user `{}`", self.user)
    }
}

impl fmt::Debug for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
