//! Memberhub Telemetry
//!
//! Structured logging via `tracing`, optional OTLP trace export, and
//! lightweight in-process metrics.

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{Counter, Gauge, Histogram};
pub use tracing_setup::init_tracing;

/// Initialize all telemetry for a service. `SERVICE_NAME` overrides
/// `default_service_name`.
pub fn init(default_service_name: &str) -> Result<TelemetryGuard, TelemetryError> {
    let config = TelemetryConfig::from_env(default_service_name);
    init_tracing(&config)?;
    Ok(TelemetryGuard { _private: () })
}

/// Guard that flushes and shuts down the trace exporter on drop
pub struct TelemetryGuard {
    _private: (),
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        opentelemetry::global::shutdown_tracer_provider();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),

    #[error("OTLP configuration error: {0}")]
    OtlpConfig(String),
}
