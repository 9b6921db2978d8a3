//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → pubsub::handler (push pipeline)
//!     → Send to client
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
