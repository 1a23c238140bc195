//! Command and response framing.
//!
//! Commands are written verbatim without any delimiter. Responses carry no
//! length prefix, the end of a response is detected by reading it in
//! chunks: a read shorter than the chunk size that ends with [`SENTINEL`]
//! is the last one.
//!
//! A response whose final read happens to fill a whole chunk is never
//! recognized as complete, the read then only ends with an error or the
//! read timeout.
use std::{io, time::Duration};

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Error, Result, common::{trace, verbose}};

/// Marks the end of a response.
pub const SENTINEL: &[u8] = b"OK";

/// Write `bytes` as is and flush.
pub(crate) async fn write_raw<W>(io: &mut W, bytes: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    io.write_all(bytes).await?;
    io.flush().await?;
    Ok(())
}

/// A single read, end of stream is an error.
pub(crate) async fn read_once<R>(io: &mut R, buf: &mut [u8], timeout: Option<Duration>) -> Result<usize>
where
    R: AsyncRead + Unpin,
{
    let result = match timeout {
        Some(timeout) => match tokio::time::timeout(timeout, io.read(buf)).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no data received after {timeout:?}"),
            )),
        },
        None => io.read(buf).await,
    };

    match result {
        Ok(0) => Err(Error::read(io::ErrorKind::UnexpectedEof.into())),
        Ok(n) => Ok(n),
        Err(err) => Err(Error::read(err)),
    }
}

/// Returns `true` if `read` is the final read of a response.
pub fn is_terminal(read: &[u8], chunk_size: usize) -> bool {
    read.len() < chunk_size && read.ends_with(SENTINEL)
}

/// Read a response until the terminal read, returning it without [`SENTINEL`].
pub(crate) async fn read_framed<R>(io: &mut R, chunk_size: usize, timeout: Option<Duration>) -> Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut response = BytesMut::with_capacity(chunk_size);
    let mut chunk = vec![0u8; chunk_size];

    loop {
        let n = read_once(io, &mut chunk, timeout).await?;
        let read = &chunk[..n];
        verbose!(len = n, "chunk");

        if is_terminal(read, chunk_size) {
            response.extend_from_slice(&read[..n - SENTINEL.len()]);
            break;
        }

        response.extend_from_slice(read);
    }

    trace!("response complete, {} bytes", response.len());
    Ok(response.freeze())
}

#[cfg(test)]
mod test {
    use std::{io, time::Duration};

    use super::*;
    use crate::{ErrorKind, common::mock::MockStream};

    #[test]
    fn terminal_read() {
        assert!(is_terminal(b"defOK", 8));
        assert!(is_terminal(b"OK", 8));
        assert!(!is_terminal(b"defOK", 5));
        assert!(!is_terminal(b"def", 8));
        assert!(!is_terminal(b"OKdef", 8));
    }

    #[tokio::test]
    async fn strips_sentinel() {
        let mut io = MockStream::new().frame("abc").frame("defOK");
        let res = read_framed(&mut io, 8, None).await.unwrap();
        assert_eq!(&res[..], b"abcdef");
    }

    #[tokio::test]
    async fn full_chunks_accumulate() {
        let mut io = MockStream::new().frame("abcd").frame("efgh").frame("iOK");
        let res = read_framed(&mut io, 4, None).await.unwrap();
        assert_eq!(&res[..], b"abcdefghi");
    }

    #[tokio::test]
    async fn full_chunk_with_sentinel_is_not_terminal() {
        let mut io = MockStream::new().frame("abc").frame("defOK").frame("OK");
        let res = read_framed(&mut io, 5, None).await.unwrap();
        assert_eq!(&res[..], b"abcdefOK");
    }

    #[tokio::test]
    async fn empty_response() {
        let mut io = MockStream::new().frame("OK");
        let res = read_framed(&mut io, 80, None).await.unwrap();
        assert!(res.is_empty());
    }

    #[tokio::test]
    async fn read_error_aborts() {
        let mut io = MockStream::new().frame("abc").fail(io::ErrorKind::ConnectionReset);
        let err = read_framed(&mut io, 80, None).await.unwrap_err();
        let ErrorKind::Read(err) = err.kind() else { panic!("{err}") };
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[tokio::test]
    async fn end_of_stream_aborts() {
        // exact boundary response, the server closes without a short read
        let mut io = MockStream::new().frame("abcdeOK");
        let err = read_framed(&mut io, 7, None).await.unwrap_err();
        let ErrorKind::Read(err) = err.kind() else { panic!("{err}") };
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn read_timeout() {
        let (mut io, _server) = tokio::io::duplex(64);
        let err = read_framed(&mut io, 80, Some(Duration::from_millis(20))).await.unwrap_err();
        let ErrorKind::Read(err) = err.kind() else { panic!("{err}") };
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn writes_verbatim() {
        let mut io = MockStream::new();
        write_raw(&mut io, b"list servers").await.unwrap();
        assert_eq!(io.written, b"list servers");
    }
}
