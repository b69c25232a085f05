//! Memberhub database access
//!
//! PostgreSQL connection pooling plus the relational schema that backs the
//! users, profiles, posts and member tiers.

mod error;
mod migrations;
mod pool;

pub use error::{DbError, Result};
pub use migrations::{migrate, seed_member_types, MemberTierSeed};
pub use pool::{DbPool, PoolConfig};

/// Re-export tokio-postgres types for convenience
pub use tokio_postgres::{error::SqlState, Row};
