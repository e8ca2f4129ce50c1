//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer + relay pipeline produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
