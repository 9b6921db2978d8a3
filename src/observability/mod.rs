//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler outcomes produce:
//!     → logging.rs (one structured log event per request)
//!     → metrics.rs (outcome counter, latency histogram)
//!
//! Consumers:
//!     → stdout (collected by the hosting platform)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached by middleware, not by the handler
//! - Metrics exporter is off unless enabled in config

pub mod logging;
pub mod metrics;
