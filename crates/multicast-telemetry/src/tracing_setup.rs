//! Global tracing subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! pretty or a JSON `fmt` layer, depending on [`TelemetryConfig`].

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber described by `config`.
///
/// Fails with [`TelemetryError::Init`] if a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    config.validate()?;
    let env_filter = config.env_filter()?;

    let fmt_layer = if !config.console_output {
        None
    } else if config.json_logs {
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true)
                .boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        filter = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );

    Ok(())
}

/// Install a test-friendly subscriber once per process.
///
/// Output goes through the libtest capture writer, filtered by
/// `MULTICAST_LOG_LEVEL` / `RUST_LOG` (default `trace` for this workspace's
/// crates). Later calls are no-ops.
pub fn init_for_tests() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let config = TelemetryConfig::from_env();
        let directive = if config.log_level == crate::config::DEFAULT_LOG_LEVEL {
            "shared_multicast=trace,multicast_telemetry=debug,info".to_string()
        } else {
            config.log_level
        };
        let env_filter = tracing_subscriber::EnvFilter::try_new(directive)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
