use tokio::io::{AsyncRead, AsyncWrite};

use super::{AuthenticationError, Config, NegotiationError, Phase};
use crate::{
    Result,
    common::{debug, verbose},
    frame,
};

/// Greeting frame length.
const GREETING_LEN: usize = 4;
/// Acknowledgement of the user name.
const USER_ACK_LEN: usize = 8;
/// Prefix of a rejected password reply.
const FAILED: &[u8] = b"FAILED";
/// Handshake frames are read into a buffer this size.
const HANDSHAKE_BUF: usize = 80;

/// Perform the admin handshake.
///
/// 1. server sends a 4 bytes greeting
/// 2. client sends the user name, server acknowledge with 8 bytes
/// 3. client sends the password, server replies `FAILED...` on rejection
///
/// Each step is a single read, the frame length is checked as is.
pub(crate) async fn startup<IO>(io: &mut IO, config: &Config) -> Result<Phase>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; HANDSHAKE_BUF];
    let mut phase = Phase::AwaitingGreeting;
    verbose!(%phase, "handshake");

    let n = frame::read_once(io, &mut buf, config.read_timeout).await?;
    expect_len(phase, GREETING_LEN, n)?;

    frame::write_raw(io, config.user.as_bytes()).await?;
    phase = Phase::AwaitingUserAck;
    verbose!(%phase, "handshake");

    let n = frame::read_once(io, &mut buf, config.read_timeout).await?;
    expect_len(phase, USER_ACK_LEN, n)?;

    frame::write_raw(io, config.pass.as_bytes()).await?;
    phase = Phase::AwaitingPassAck;
    verbose!(%phase, "handshake");

    let n = frame::read_once(io, &mut buf, config.read_timeout).await?;
    if buf[..n].starts_with(FAILED) {
        debug!("{}: user `{}`", Phase::Rejected, config.user);
        return Err(AuthenticationError { user: config.user.to_string() }.into());
    }

    phase = Phase::Authenticated;
    debug!("{phase} as `{}`", config.user);
    Ok(phase)
}

fn expect_len(phase: Phase, expect: usize, found: usize) -> Result<(), NegotiationError> {
    if expect == found {
        Ok(())
    } else {
        debug!("negotiation failed in {phase}: expected {expect} bytes, found {found}");
        Err(NegotiationError { phase, expect, found })
    }
}
