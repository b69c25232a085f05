//! Service bootstrap: store selection, schema construction and the HTTP server

use async_trait::async_trait;
use memberhub_core::{
    HealthStatus, HubError, HubService, ReadinessStatus, Result, ServiceConfig, StoreBackend,
};
use memberhub_db::{migrate, seed_member_types, DbPool, MemberTierSeed, PoolConfig};
use std::sync::Arc;
use tracing::info;

use crate::api::{self, health, AppState};
use crate::domain::MemberType;
use crate::schema::build_schema;
use crate::store::{MemoryStore, PgStore, SharedStore};

pub struct GraphqlApiService {
    config: ServiceConfig,
    state: AppState,
}

impl GraphqlApiService {
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        let store = connect_store(&config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Build the service around an already constructed store
    pub fn with_store(config: ServiceConfig, store: SharedStore) -> Self {
        let schema = build_schema(store.clone());
        info!(backend = store.backend(), "GraphQL schema built");
        Self {
            config,
            state: AppState::new(schema, store),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn connect_store(config: &ServiceConfig) -> Result<SharedStore> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Postgres => {
            let pool = DbPool::new(PoolConfig {
                url: config.database_url.clone(),
                max_size: config.database_pool_size,
            })
            .map_err(|e| HubError::Database(e.to_string()))?;

            if config.run_migrations {
                migrate(&pool)
                    .await
                    .map_err(|e| HubError::Database(e.to_string()))?;
                let tiers = MemberType::seeded();
                seed_member_types(&pool, &member_tier_seeds(&tiers))
                    .await
                    .map_err(|e| HubError::Database(e.to_string()))?;
            }

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

fn member_tier_seeds(tiers: &[MemberType]) -> Vec<MemberTierSeed<'_>> {
    tiers
        .iter()
        .map(|tier| MemberTierSeed {
            id: tier.id.as_str(),
            discount: tier.discount,
            posts_limit_per_month: tier.posts_limit_per_month,
        })
        .collect()
}

#[async_trait]
impl HubService for GraphqlApiService {
    fn service_id(&self) -> &'static str {
        health::SERVICE_ID
    }

    async fn health(&self) -> HealthStatus {
        health::health_status(&self.state)
    }

    async fn ready(&self) -> ReadinessStatus {
        health::readiness_status(&self.state).await
    }

    async fn shutdown(&self) -> Result<()> {
        let metrics = &self.state.metrics;
        info!(
            requests = metrics.requests.get(),
            failed = metrics.failed_requests.get(),
            mean_ms = metrics.latency_ms.mean(),
            p99_ms = metrics.latency_ms.percentile(99.0),
            "Shutting down GraphQL API"
        );
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        info!(
            service = %self.config.service_name,
            http = %self.config.http_bind,
            path = api::GRAPHQL_PATH,
            "Starting GraphQL API server"
        );

        let app = api::create_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(&self.config.http_bind).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
