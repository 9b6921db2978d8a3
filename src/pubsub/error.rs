//! Pipeline error taxonomy.
//!
//! Every failure is a client error (400). The variant records which stage
//! failed; only the fixed reason string is sent back to the caller.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure extracting the payload from a decoded envelope.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("message.data is missing")]
    MissingData,

    #[error("invalid base64url data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Failure at one of the request pipeline stages.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("malformed push envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("undecodable message payload: {0}")]
    Payload(#[from] PayloadError),
}

impl PushError {
    /// Reason string returned to the caller.
    pub fn reason(&self) -> &'static str {
        match self {
            PushError::BodyRead(_) => "Bad HTTP Request",
            PushError::Envelope(_) => "Bad Pub/Sub Request",
            PushError::Payload(_) => "Bad Pub/Sub message",
        }
    }

    /// Metric label for this failure kind.
    pub fn outcome(&self) -> &'static str {
        match self {
            PushError::BodyRead(_) => "bad_http_request",
            PushError::Envelope(_) => "bad_envelope",
            PushError::Payload(_) => "bad_message",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for PushError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                ),
                (
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ),
            ],
            format!("{}\n", self.reason()),
        )
            .into_response()
    }
}
