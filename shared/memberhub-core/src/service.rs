//! Service infrastructure for memberhub services

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use crate::error::{HubError, Result};

/// Health status for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub service_id: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Readiness status for readiness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    pub ready: bool,
    pub dependencies: Vec<DependencyStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub latency_ms: Option<u64>,
}

/// Standard trait every memberhub service implements
#[async_trait]
pub trait HubService: Send + Sync + 'static {
    /// Service identifier (e.g., "graphql-api")
    fn service_id(&self) -> &'static str;

    /// Service version
    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Health check - is the service alive?
    async fn health(&self) -> HealthStatus;

    /// Readiness check - are all dependencies available?
    async fn ready(&self) -> ReadinessStatus;

    /// Graceful shutdown
    async fn shutdown(&self) -> Result<()>;

    /// Start the service and serve until the listener stops
    async fn start(&self) -> Result<()>;
}

/// Standard microservice runtime bootstrap
pub struct MicroserviceRuntime {
    start_time: std::time::Instant,
}

impl MicroserviceRuntime {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }

    /// Run a service until it stops on its own or a shutdown signal arrives
    pub async fn run<S: HubService>(service: Arc<S>) -> Result<()> {
        let runtime = Self::new();

        info!(
            service_id = service.service_id(),
            version = service.version(),
            "Starting microservice"
        );

        let service_clone = service.clone();
        let mut service_handle = tokio::spawn(async move { service_clone.start().await });

        let outcome = tokio::select! {
            joined = &mut service_handle => {
                match joined {
                    Ok(Ok(())) => {
                        warn!("Service stopped without a shutdown signal");
                        Ok(())
                    }
                    Ok(Err(e)) => {
                        error!(code = e.error_code(), error = %e, "Service error");
                        Err(e)
                    }
                    Err(e) => Err(HubError::Internal(format!("Service task failed: {}", e))),
                }
            }
            _ = Self::wait_for_shutdown() => {
                info!("Shutdown signal received, gracefully stopping...");
                service_handle.abort();
                Ok(())
            }
        };

        if let Err(e) = service.shutdown().await {
            warn!("Error during shutdown: {}", e);
        }

        info!(
            uptime_seconds = runtime.start_time.elapsed().as_secs(),
            "Microservice stopped"
        );

        outcome
    }

    async fn wait_for_shutdown() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }
}

impl Default for MicroserviceRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FailingService {
        shut_down: AtomicBool,
    }

    #[async_trait]
    impl HubService for FailingService {
        fn service_id(&self) -> &'static str {
            "failing"
        }

        async fn health(&self) -> HealthStatus {
            HealthStatus {
                healthy: false,
                service_id: self.service_id().to_string(),
                version: self.version().to_string(),
                uptime_seconds: 0,
            }
        }

        async fn ready(&self) -> ReadinessStatus {
            ReadinessStatus {
                ready: false,
                dependencies: vec![],
            }
        }

        async fn shutdown(&self) -> Result<()> {
            self.shut_down.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn start(&self) -> Result<()> {
            Err(HubError::Network("address in use".to_string()))
        }
    }

    #[tokio::test]
    async fn test_start_failure_is_returned_and_shutdown_runs() {
        let service = Arc::new(FailingService {
            shut_down: AtomicBool::new(false),
        });

        let result = MicroserviceRuntime::run(service.clone()).await;

        assert!(matches!(result, Err(HubError::Network(_))));
        assert!(service.shut_down.load(Ordering::SeqCst));
    }
}
