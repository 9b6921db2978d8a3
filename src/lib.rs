//! Pub/Sub push greeting service.
//!
//! Receives Pub/Sub messages delivered by push (for example through an
//! Eventarc trigger), decodes the base64url payload and answers with a
//! greeting that echoes the CloudEvents `Ce-Id` header.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pubsub;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
