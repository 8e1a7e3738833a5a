//! Tracing setup for the advisory status stream.
//!
//! Status lines carry a timestamp, the emitting component (tracing target),
//! and a message. They are operator guidance, not a machine protocol.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

use crate::CiteError;

static TELEMETRY_GUARD: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "info";

/// Configuration options when initialising telemetry.
#[derive(Debug, Clone)]
pub struct TelemetryOptions {
    pub env_filter: Option<String>,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self {
            env_filter: None,
            with_ansi: true,
            with_target: true,
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Safe to call multiple times; only the first invocation installs the
/// subscriber. `RUST_LOG` wins over the built-in default, an explicit
/// `env_filter` wins over both.
pub fn init_telemetry(options: TelemetryOptions) -> Result<(), CiteError> {
    if TELEMETRY_GUARD.get().is_some() {
        return Ok(());
    }

    let env_filter = options
        .env_filter
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_ansi(options.with_ansi)
        .with_target(options.with_target)
        .try_init()
        .map_err(|err| CiteError::Other(anyhow::anyhow!("telemetry init failed: {err}")))?;

    TELEMETRY_GUARD.get_or_init(|| ());
    Ok(())
}
