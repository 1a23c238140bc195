//! Scripted in-memory stream for tests.
//!
//! Each scripted frame is returned by exactly one read, which makes chunk
//! boundaries deterministic. An exhausted script reads as end of stream.
use std::{
    collections::VecDeque,
    io,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

enum Step {
    Frame(Vec<u8>),
    Fail(io::ErrorKind),
}

#[derive(Default)]
pub struct MockStream {
    script: VecDeque<Step>,
    pub written: Vec<u8>,
}

impl MockStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame the server sends in a single read.
    pub fn frame(mut self, frame: impl AsRef<[u8]>) -> Self {
        self.script.push_back(Step::Frame(frame.as_ref().to_vec()));
        self
    }

    /// Queue a read failure.
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.script.push_back(Step::Fail(kind));
        self
    }

    /// Successful handshake frames.
    pub fn authenticated() -> Self {
        Self::new().frame("MAXS").frame("PASSWORD").frame("MaxScale>")
    }
}

impl AsyncRead for MockStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.script.pop_front() {
            Some(Step::Frame(mut frame)) => {
                let n = frame.len().min(buf.remaining());
                buf.put_slice(&frame[..n]);
                if n < frame.len() {
                    let rest = frame.split_off(n);
                    self.script.push_front(Step::Frame(rest));
                }
                Poll::Ready(Ok(()))
            }
            Some(Step::Fail(kind)) => Poll::Ready(Err(kind.into())),
            None => Poll::Ready(Ok(())),
        }
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
