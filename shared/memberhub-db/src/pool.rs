//! Connection pool for the memberhub database

use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{info, warn};

use crate::{DbError, Result};

/// Where to connect and how many connections to hold at most
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_size: usize,
}

/// PostgreSQL connection pool shared by the store and the migrations
#[derive(Clone)]
pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    /// Build the pool. No connection is opened until the first checkout.
    pub fn new(config: PoolConfig) -> Result<Self> {
        if config.max_size == 0 {
            return Err(DbError::Configuration(
                "pool size must be at least 1".to_string(),
            ));
        }

        let pg_config: tokio_postgres::Config = config
            .url
            .parse()
            .map_err(|e| DbError::Configuration(format!("Invalid URL: {}", e)))?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(manager)
            .max_size(config.max_size)
            .build()
            .map_err(|e| DbError::Pool(e.to_string()))?;

        info!(max_size = config.max_size, "Database pool ready");
        Ok(Self { pool })
    }

    /// Check out a connection
    pub async fn get(&self) -> Result<Object> {
        self.pool
            .get()
            .await
            .map_err(|e| DbError::Pool(e.to_string()))
    }

    /// Round-trip a trivial statement; false when the database cannot be reached
    pub async fn is_healthy(&self) -> bool {
        let conn = match self.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Database checkout failed");
                return false;
            }
        };
        match conn.simple_query("SELECT 1").await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}
