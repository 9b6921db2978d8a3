//! Pub/Sub push delivery subsystem.
//!
//! # Data Flow
//! ```text
//! POST body (JSON push envelope)
//!     → envelope.rs (parse envelope, base64url-decode message.data)
//!     → handler.rs (compose greeting, log, respond)
//!     → error.rs (stage failure → 400 + fixed reason)
//! ```

pub mod envelope;
pub mod error;
pub mod handler;

pub use envelope::{Envelope, PubsubMessage, DEFAULT_NAME};
pub use error::{PayloadError, PushError};
pub use handler::{push_handler, CE_ID};
