//! # Multicast Telemetry
//!
//! Log output setup for binaries and tests built on `shared-multicast`.
//!
//! The library crates only emit `tracing` events. This crate decides where
//! they go: a pretty or JSON `fmt` layer behind an `EnvFilter`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use multicast_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> Result<(), multicast_telemetry::TelemetryError> {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config)?;
//!
//!     // Subscription and invocation events are now logged
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MULTICAST_SERVICE` | `multicast` | Service name on the startup line |
//! | `MULTICAST_LOG_LEVEL` | `info` | Filter directive (falls back to `RUST_LOG`) |
//! | `MULTICAST_CONSOLE` | `true` | Write logs to stdout |
//! | `MULTICAST_JSON_LOGS` | `false` | Emit JSON lines |

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_for_tests, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TelemetryError {
    /// Short label for structured log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Config(_) => "config",
        }
    }
}
