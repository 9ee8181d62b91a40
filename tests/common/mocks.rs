//! Byte-stream mocks for driving the SSE reader without a server.

use bytes::Bytes;
use futures::stream::{self, Stream};

/// Split `body` at the given byte offsets into a chunk stream.
///
/// Offsets must be ascending and within the body.
pub fn chunked(body: &[u8], splits: &[usize]) -> impl Stream<Item = Result<Bytes, String>> + Send + 'static {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &split in splits {
        chunks.push(Ok(Bytes::copy_from_slice(&body[start..split])));
        start = split;
    }
    chunks.push(Ok(Bytes::copy_from_slice(&body[start..])));
    stream::iter(chunks)
}

/// Deliver `body` one byte per chunk.
pub fn byte_by_byte(body: &[u8]) -> impl Stream<Item = Result<Bytes, String>> + Send + 'static {
    let chunks: Vec<Result<Bytes, String>> = body
        .iter()
        .map(|b| Ok(Bytes::copy_from_slice(&[*b])))
        .collect();
    stream::iter(chunks)
}

/// Deliver `body`, then fail with a transport error.
pub fn failing_after(body: &[u8], error: &str) -> impl Stream<Item = Result<Bytes, String>> + Send + 'static {
    stream::iter(vec![
        Ok(Bytes::copy_from_slice(body)),
        Err(error.to_string()),
    ])
}
