//! Push request handler.
//!
//! # Pipeline
//! ```text
//! ReadBody ──▶ DecodeEnvelope ──▶ ExtractData ──▶ Compose ──▶ Emit (200)
//!    │               │                 │
//!    └───────────────┴─────────────────┴──▶ 400 + fixed reason
//! ```
//!
//! Each request is handled in isolation; nothing is shared between calls.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pubsub::envelope::Envelope;
use crate::pubsub::error::PushError;

/// CloudEvents correlation header set by the push sender.
pub const CE_ID: &str = "ce-id";

/// Handle one push delivery.
pub async fn push_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let ce_id = ce_id(&parts.headers);

    // The body stream is consumed or dropped here on every path.
    let result = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => greet(&bytes, &ce_id),
        Err(e) => Err(PushError::BodyRead(e)),
    };

    match result {
        Ok(greeting) => {
            tracing::info!(ce_id = %ce_id, "{}", greeting);
            metrics::record_push("ok", start_time);
            (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                )],
                format!("{}\n", greeting),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(
                ce_id = %ce_id,
                status = err.status().as_u16(),
                error = %err,
                "{}",
                err.reason()
            );
            metrics::record_push(err.outcome(), start_time);
            err.into_response()
        }
    }
}

/// Run the decode stages over a fully read body and compose the greeting.
pub fn greet(body: &[u8], ce_id: &str) -> Result<String, PushError> {
    let envelope = Envelope::decode(body)?;
    let name = envelope.name()?;
    Ok(compose(&name, ce_id))
}

/// Greeting text without the trailing newline.
pub fn compose(name: &str, ce_id: &str) -> String {
    format!("Hello, {}! ID: {}", name, ce_id)
}

/// First `Ce-Id` value, or empty when absent.
fn ce_id(headers: &HeaderMap) -> String {
    headers
        .get(CE_ID)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;

    fn state() -> AppState {
        AppState {
            max_body_bytes: 1024,
        }
    }

    fn request(body: impl Into<Body>, ce_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(id) = ce_id {
            builder = builder.header("Ce-Id", id);
        }
        builder.body(body.into()).unwrap()
    }

    async fn call(request: Request<Body>) -> (StatusCode, String) {
        let response = push_handler(State(state()), request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_greet_success() {
        let greeting = greet(br#"{"message":{"data":"d29ybGQ="}}"#, "abc123").unwrap();
        assert_eq!(greeting, "Hello, world! ID: abc123");
    }

    #[test]
    fn test_greet_stage_errors() {
        assert!(matches!(greet(b"nope", ""), Err(PushError::Envelope(_))));
        assert!(matches!(
            greet(br#"{"message":{"data":"!!!"}}"#, ""),
            Err(PushError::Payload(_))
        ));
        assert!(matches!(
            greet(br#"{"message":{}}"#, ""),
            Err(PushError::Payload(_))
        ));
    }

    #[test]
    fn test_greeting_is_not_a_template() {
        // "%s%n{}" base64url encoded
        let greeting = greet(br#"{"message":{"data":"JXMlbnt9"}}"#, "{0}").unwrap();
        assert_eq!(greeting, "Hello, %s%n{}! ID: {0}");
    }

    #[tokio::test]
    async fn test_handler_success() {
        let (status, body) = call(request(
            r#"{"message":{"data":"d29ybGQ="}}"#,
            Some("abc123"),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, world! ID: abc123\n");
    }

    #[tokio::test]
    async fn test_handler_empty_data_without_ce_id() {
        let (status, body) = call(request(r#"{"message":{"data":""}}"#, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, World! ID: \n");
    }

    #[tokio::test]
    async fn test_handler_bad_envelope() {
        let (status, body) = call(request("definitely not json", Some("x"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Bad Pub/Sub Request\n");
    }

    #[tokio::test]
    async fn test_handler_bad_base64() {
        let (status, body) = call(request(r#"{"message":{"data":"d29y+GQ="}}"#, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Bad Pub/Sub message\n");
    }

    #[tokio::test]
    async fn test_handler_missing_data() {
        let (status, body) = call(request(r#"{"message":{"messageId":"1"}}"#, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Bad Pub/Sub message\n");
    }

    #[tokio::test]
    async fn test_handler_body_read_failure() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"{\"message\":")),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )),
        ];
        let body = Body::from_stream(futures_util::stream::iter(chunks));

        let (status, body) = call(request(body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Bad HTTP Request\n");
    }

    #[tokio::test]
    async fn test_handler_body_over_limit() {
        let data = "a".repeat(2048);
        let (status, body) = call(request(
            format!(r#"{{"message":{{"data":"{}"}}}}"#, data),
            None,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Bad HTTP Request\n");
    }

    #[tokio::test]
    async fn test_handler_is_idempotent() {
        let first = call(request(r#"{"message":{"data":"d29ybGQ="}}"#, Some("id"))).await;
        let second = call(request(r#"{"message":{"data":"d29ybGQ="}}"#, Some("id"))).await;
        assert_eq!(first, second);
    }
}
