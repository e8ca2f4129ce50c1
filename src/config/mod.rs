//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.yaml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the relayer and HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; any error is fatal
//! - Optional keys have defaults so a bare five-key file still works
//! - The private key never appears in Debug output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RelayConfig};
pub use validation::ValidationIssue;
