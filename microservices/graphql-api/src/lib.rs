//! GraphQL CRUD API
//!
//! A single GraphQL endpoint over users, profiles, posts and membership
//! tiers:
//! - Point lookups and full listings for every entity
//! - Create and delete mutations for users, posts and profiles
//! - Lazily resolved relations (one store lookup per relation field)
//! - PostgreSQL or in-memory storage behind the `DataStore` trait

pub mod api;
pub mod domain;
pub mod schema;
pub mod service;
pub mod store;

pub use api::{create_router, AppState};
pub use schema::{build_schema, ApiSchema};
pub use service::GraphqlApiService;
pub use store::{DataStore, MemoryStore, PgStore, SharedStore, StoreError};
