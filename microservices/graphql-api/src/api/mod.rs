//! HTTP surface: the GraphQL endpoint plus liveness and readiness probes

pub mod graphql;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use memberhub_telemetry::{Counter, Gauge, Histogram};
use std::time::Instant;

use crate::schema::ApiSchema;
use crate::store::SharedStore;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Latency samples kept for percentile reporting
const LATENCY_WINDOW: usize = 10_000;

/// Request metrics recorded by the GraphQL handler
#[derive(Clone)]
pub struct ApiMetrics {
    pub requests: Counter,
    pub failed_requests: Counter,
    pub in_flight: Gauge,
    pub latency_ms: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self {
            requests: Counter::default(),
            failed_requests: Counter::default(),
            in_flight: Gauge::default(),
            latency_ms: Histogram::new(LATENCY_WINDOW),
        }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub schema: ApiSchema,
    pub store: SharedStore,
    pub metrics: ApiMetrics,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(schema: ApiSchema, store: SharedStore) -> Self {
        Self {
            schema,
            store,
            metrics: ApiMetrics::new(),
            started_at: Instant::now(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // GraphQL endpoint, POST only
        .route(GRAPHQL_PATH, post(graphql::graphql_handler))
        .with_state(state)
}
