//! GraphQL request handler

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use std::time::Instant;
use tracing::{debug, warn};

use super::AppState;

/// Executes `{ query, variables, operationName }` against the shared schema
/// and answers with `{ data, errors }`.
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner();
    let metrics = &state.metrics;

    metrics.requests.inc();
    metrics.in_flight.inc();
    let started = Instant::now();

    debug!(operation = ?request.operation_name, "Executing GraphQL request");
    let response = state.schema.execute(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    metrics.in_flight.dec();
    metrics.latency_ms.record(elapsed_ms);

    if response.is_err() {
        metrics.failed_requests.inc();
        let first_error = response.errors.first().map(|e| e.message.as_str()).unwrap_or_default();
        warn!(
            errors = response.errors.len(),
            first_error,
            elapsed_ms,
            "GraphQL request completed with errors"
        );
    } else {
        debug!(elapsed_ms, "GraphQL request completed");
    }

    response.into()
}
