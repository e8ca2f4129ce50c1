//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Gateway → Signer → Listener
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger → server stops accepting → drain → exit
//! ```
//!
//! Any startup error is fatal.

pub mod shutdown;

pub use shutdown::Shutdown;
