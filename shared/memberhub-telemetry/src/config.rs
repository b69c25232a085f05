//! Telemetry Configuration

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Reported as the OTLP `service.name` resource and in the startup log
    pub service_name: String,
    pub otlp_endpoint: Option<String>,
    pub log_level: String,
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Read from the process environment. `default_service_name` applies
    /// when `SERVICE_NAME` is unset or blank.
    pub fn from_env(default_service_name: &str) -> Self {
        Self::from_lookup(default_service_name, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            service_name: lookup("SERVICE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| default_service_name.to_string()),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .filter(|endpoint| !endpoint.trim().is_empty()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            json_logs: lookup("JSON_LOGS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
                .unwrap_or(true),
        }
    }
}
