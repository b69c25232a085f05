//! PostgreSQL data store
//!
//! One statement per call. Relational constraints and the cascade on user
//! deletion are enforced by the schema in `memberhub_db::migrate`.

use async_trait::async_trait;
use memberhub_db::{DbPool, Row};
use tracing::instrument;
use uuid::Uuid;

use super::{DataStore, StoreError, StoreResult};
use crate::domain::{
    EntityKind, MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile,
    UnknownMemberTypeId, User,
};

/// Store backed by the shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(&self, sql: &str, entity: EntityKind, id: Uuid) -> StoreResult<Uuid> {
        let conn = self.pool.get().await?;
        let deleted = conn.execute(sql, &[&id]).await?;

        if deleted == 0 {
            return Err(StoreError::not_found(entity, id));
        }
        Ok(id)
    }
}

fn row_to_user(row: &Row) -> StoreResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        balance: row.try_get("balance")?,
    })
}

fn row_to_post(row: &Row) -> StoreResult<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author_id: row.try_get("author_id")?,
    })
}

fn row_to_profile(row: &Row) -> StoreResult<Profile> {
    Ok(Profile {
        id: row.try_get("id")?,
        is_male: row.try_get("is_male")?,
        year_of_birth: row.try_get("year_of_birth")?,
        user_id: row.try_get("user_id")?,
        member_type_id: parse_member_type_id(row.try_get("member_type_id")?)?,
    })
}

fn row_to_member_type(row: &Row) -> StoreResult<MemberType> {
    Ok(MemberType {
        id: parse_member_type_id(row.try_get("id")?)?,
        discount: row.try_get("discount")?,
        posts_limit_per_month: row.try_get("posts_limit_per_month")?,
    })
}

fn parse_member_type_id(raw: &str) -> StoreResult<MemberTypeId> {
    raw.parse()
        .map_err(|e: UnknownMemberTypeId| StoreError::Database(e.to_string()))
}

fn collect<T>(rows: &[Row], map: fn(&Row) -> StoreResult<T>) -> StoreResult<Vec<T>> {
    rows.iter().map(map).collect()
}

#[async_trait]
impl DataStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn is_healthy(&self) -> bool {
        self.pool.is_healthy().await
    }

    #[instrument(skip(self))]
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt("SELECT id, name, balance FROM users WHERE id = $1", &[&id])
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    #[instrument(skip(self))]
    async fn users(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get().await?;
        let rows = conn.query("SELECT id, name, balance FROM users", &[]).await?;
        collect(&rows, row_to_user)
    }

    #[instrument(skip(self, user))]
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_one(
                "INSERT INTO users (id, name, balance) VALUES ($1, $2, $3) \
                 RETURNING id, name, balance",
                &[&Uuid::new_v4(), &user.name, &user.balance],
            )
            .await?;
        row_to_user(&row)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: Uuid) -> StoreResult<Uuid> {
        self.delete_by_id("DELETE FROM users WHERE id = $1", EntityKind::User, id)
            .await
    }

    #[instrument(skip(self))]
    async fn post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "SELECT id, title, content, author_id FROM posts WHERE id = $1",
                &[&id],
            )
            .await?;
        row.as_ref().map(row_to_post).transpose()
    }

    #[instrument(skip(self))]
    async fn posts(&self) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query("SELECT id, title, content, author_id FROM posts", &[])
            .await?;
        collect(&rows, row_to_post)
    }

    #[instrument(skip(self))]
    async fn posts_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT id, title, content, author_id FROM posts WHERE author_id = $1",
                &[&author_id],
            )
            .await?;
        collect(&rows, row_to_post)
    }

    #[instrument(skip(self, post))]
    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_one(
                "INSERT INTO posts (id, title, content, author_id) VALUES ($1, $2, $3, $4) \
                 RETURNING id, title, content, author_id",
                &[&Uuid::new_v4(), &post.title, &post.content, &post.author_id],
            )
            .await?;
        row_to_post(&row)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: Uuid) -> StoreResult<Uuid> {
        self.delete_by_id("DELETE FROM posts WHERE id = $1", EntityKind::Post, id)
            .await
    }

    #[instrument(skip(self))]
    async fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "SELECT id, is_male, year_of_birth, user_id, member_type_id \
                 FROM profiles WHERE id = $1",
                &[&id],
            )
            .await?;
        row.as_ref().map(row_to_profile).transpose()
    }

    #[instrument(skip(self))]
    async fn profiles(&self) -> StoreResult<Vec<Profile>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT id, is_male, year_of_birth, user_id, member_type_id FROM profiles",
                &[],
            )
            .await?;
        collect(&rows, row_to_profile)
    }

    #[instrument(skip(self))]
    async fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "SELECT id, is_male, year_of_birth, user_id, member_type_id \
                 FROM profiles WHERE user_id = $1",
                &[&user_id],
            )
            .await?;
        row.as_ref().map(row_to_profile).transpose()
    }

    #[instrument(skip(self))]
    async fn profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> StoreResult<Vec<Profile>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT id, is_male, year_of_birth, user_id, member_type_id \
                 FROM profiles WHERE member_type_id = $1",
                &[&member_type_id.as_str()],
            )
            .await?;
        collect(&rows, row_to_profile)
    }

    #[instrument(skip(self, profile))]
    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_one(
                "INSERT INTO profiles (id, is_male, year_of_birth, user_id, member_type_id) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, is_male, year_of_birth, user_id, member_type_id",
                &[
                    &Uuid::new_v4(),
                    &profile.is_male,
                    &profile.year_of_birth,
                    &profile.user_id,
                    &profile.member_type_id.as_str(),
                ],
            )
            .await?;
        row_to_profile(&row)
    }

    #[instrument(skip(self))]
    async fn delete_profile(&self, id: Uuid) -> StoreResult<Uuid> {
        self.delete_by_id("DELETE FROM profiles WHERE id = $1", EntityKind::Profile, id)
            .await
    }

    #[instrument(skip(self))]
    async fn member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "SELECT id, discount, posts_limit_per_month FROM member_types WHERE id = $1",
                &[&id.as_str()],
            )
            .await?;
        row.as_ref().map(row_to_member_type).transpose()
    }

    #[instrument(skip(self))]
    async fn member_types(&self) -> StoreResult<Vec<MemberType>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT id, discount, posts_limit_per_month FROM member_types ORDER BY id",
                &[],
            )
            .await?;
        collect(&rows, row_to_member_type)
    }
}
