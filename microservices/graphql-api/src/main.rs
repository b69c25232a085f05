//! GraphQL API microservice entry point

use graphql_api::{api::health::SERVICE_ID, GraphqlApiService};
use memberhub_core::{HubError, MicroserviceRuntime, Result, ServiceConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = memberhub_telemetry::init(SERVICE_ID)
        .map_err(|e| HubError::Internal(e.to_string()))?;

    info!("Starting GraphQL API");

    let config = ServiceConfig::from_env()?;
    let service = Arc::new(GraphqlApiService::new(config).await?);
    MicroserviceRuntime::run(service).await
}
