//! Newline-delimited JSON parser for streaming local runtime responses.
//!
//! The local runtime reports model download progress as one JSON object per
//! line. This module turns the raw byte stream into a stream of typed events.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::de::DeserializeOwned;

/// Converts a raw NDJSON byte stream into a stream of decoded values.
///
/// Handles buffering across chunk boundaries and a final line without a
/// trailing newline.
///
/// # Arguments
///
/// * `byte_stream` - A stream of raw bytes from an HTTP response
pub fn ndjson_stream<T>(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<T>> + Send
where
    T: DeserializeOwned + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Bytes, not String: a multi-byte character may straddle two chunks.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                if let Some(item) = parse_line(&String::from_utf8_lossy(&line)) {
                    yield item;
                }
            }
        }

        if let Some(item) = parse_line(&String::from_utf8_lossy(&buffer)) {
            yield item;
        }
    }
}

/// Parses a single NDJSON line.
///
/// Returns `None` for blank lines, otherwise the decode result.
fn parse_line<T: DeserializeOwned>(line: &str) -> Option<Result<T>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    Some(
        serde_json::from_str::<T>(line)
            .map_err(|e| anyhow::anyhow!("Invalid progress line '{line}': {e}")),
    )
}
