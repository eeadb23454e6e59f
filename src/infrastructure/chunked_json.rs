// Chunked JSON streaming utilities
use crate::domain::stream::StreamMessage;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;
use tokio::io::AsyncReadExt;

pub const CHUNKED_CONTENT_TYPE: &str = "application/x-dashboard-chunks";

/// Create a chunked streaming response, one length-prefixed frame per message
pub async fn chunked_json_stream<S>(
    stream: S,
    compress: bool,
) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(&msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Frames are compressed one by one, so no Content-Encoding on the response.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, CHUNKED_CONTENT_TYPE)
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single StreamMessage to a frame: u32 big-endian length, then payload
pub async fn serialize_chunk(msg: &StreamMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(msg)?;

    let payload = if compress {
        let mut encoder = BrotliEncoder::new(std::io::Cursor::new(buffer));
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await?;
        compressed
    } else {
        buffer
    };

    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(payload.len() as u32);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub async fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<StreamMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stream::CompletionEvent;
    use async_compression::tokio::bufread::BrotliDecoder;

    fn complete() -> StreamMessage {
        StreamMessage::Complete(CompletionEvent {
            revision: 7,
            total_widgets: 12,
            duration_ms: 3,
        })
    }

    #[tokio::test]
    async fn test_plain_frame_is_length_prefixed_json() {
        let chunk = serialize_chunk(&complete(), false).await.unwrap();
        let len = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(len, chunk.len() - 4);

        let json: serde_json::Value = serde_json::from_slice(&chunk[4..]).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["revision"], 7);
    }

    #[tokio::test]
    async fn test_compressed_frame_decodes_to_same_json() {
        let plain = serialize_chunk(&complete(), false).await.unwrap();
        let chunk = serialize_chunk(&complete(), true).await.unwrap();
        let len = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(len, chunk.len() - 4);

        let mut decoder = BrotliDecoder::new(&chunk[4..]);
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).await.unwrap();
        assert_eq!(decoded, plain[4..].to_vec());
    }

    #[tokio::test]
    async fn test_response_headers() {
        let response = chunked_json_stream(futures::stream::iter(vec![complete()]), false)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            CHUNKED_CONTENT_TYPE
        );
    }
}
