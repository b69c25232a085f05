//! Data store capability used by the resolvers
//!
//! Every resolver issues exactly one call against a [`DataStore`]. The
//! trait is object safe so the schema can hold an `Arc<dyn DataStore>` and
//! tests can swap the PostgreSQL store for [`MemoryStore`].

pub mod memory;
pub mod postgres;

use async_graphql::{ErrorExtensions, FieldError};
use async_trait::async_trait;
use memberhub_db::{DbError, SqlState};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    EntityKind, MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Shared handle placed in the GraphQL schema data
pub type SharedStore = Arc<dyn DataStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Constraint(_) => "CONSTRAINT_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl ErrorExtensions for StoreError {
    fn extend(&self) -> FieldError {
        FieldError::new(self.to_string()).extend_with(|_, e| e.set("code", self.error_code()))
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code() {
            Some(code)
                if *code == SqlState::UNIQUE_VIOLATION
                    || *code == SqlState::FOREIGN_KEY_VIOLATION =>
            {
                let detail = err
                    .as_db_error()
                    .map(|db| db.detail().unwrap_or(db.message()).to_string())
                    .unwrap_or_else(|| err.to_string());
                StoreError::Constraint(detail)
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Find-one, find-all, create and delete per entity kind, plus the
/// foreign-key lookups that back the relation fields.
#[async_trait]
pub trait DataStore: Send + Sync + 'static {
    /// Short backend name for logs and readiness output
    fn backend(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;

    async fn user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn users(&self) -> StoreResult<Vec<User>>;
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<Uuid>;

    async fn post(&self, id: Uuid) -> StoreResult<Option<Post>>;
    async fn posts(&self) -> StoreResult<Vec<Post>>;
    async fn posts_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Post>>;
    async fn create_post(&self, post: NewPost) -> StoreResult<Post>;
    async fn delete_post(&self, id: Uuid) -> StoreResult<Uuid>;

    async fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>>;
    async fn profiles(&self) -> StoreResult<Vec<Profile>>;
    async fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>>;
    async fn profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> StoreResult<Vec<Profile>>;
    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile>;
    async fn delete_profile(&self, id: Uuid) -> StoreResult<Uuid>;

    async fn member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>>;
    async fn member_types(&self) -> StoreResult<Vec<MemberType>>;
}
