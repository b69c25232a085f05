//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use memberhub_core::{DependencyStatus, HealthStatus, ReadinessStatus};
use std::time::Instant;

use super::AppState;

pub const SERVICE_ID: &str = "graphql-api";

pub fn health_status(state: &AppState) -> HealthStatus {
    HealthStatus {
        healthy: true,
        service_id: SERVICE_ID.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }
}

pub async fn readiness_status(state: &AppState) -> ReadinessStatus {
    let started = Instant::now();
    let available = state.store.is_healthy().await;
    ReadinessStatus {
        ready: available,
        dependencies: vec![DependencyStatus {
            name: state.store.backend().to_string(),
            available,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        }],
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(health_status(&state))
}

pub async fn ready_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessStatus>) {
    let status = readiness_status(&state).await;
    let code = if status.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}
