//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing)
//!     → handlers.rs (JSON extraction, dispatch to the relayer)
//!     → response.rs (success body or {"error": ...} with 400)
//!     → client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use response::{ApiError, HealthResponse, SendTransactionResponse};
pub use server::{AppState, HttpServer};
