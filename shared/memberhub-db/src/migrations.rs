//! Relational schema for users, profiles, posts and member tiers

use tracing::{info, instrument};

use crate::{DbError, DbPool, Result};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS member_types (
    id                    TEXT PRIMARY KEY,
    discount              DOUBLE PRECISION NOT NULL,
    posts_limit_per_month INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id      UUID PRIMARY KEY,
    name    TEXT NOT NULL,
    balance DOUBLE PRECISION NOT NULL
);

CREATE TABLE IF NOT EXISTS profiles (
    id             UUID PRIMARY KEY,
    is_male        BOOLEAN NOT NULL,
    year_of_birth  INTEGER NOT NULL,
    user_id        UUID NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
    member_type_id TEXT NOT NULL REFERENCES member_types (id) ON DELETE RESTRICT
);

CREATE TABLE IF NOT EXISTS posts (
    id        UUID PRIMARY KEY,
    title     TEXT NOT NULL,
    content   TEXT NOT NULL,
    author_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS posts_author_id_idx ON posts (author_id);
CREATE INDEX IF NOT EXISTS profiles_member_type_id_idx ON profiles (member_type_id);
"#;

/// One member tier row inserted by [`seed_member_types`]
#[derive(Debug, Clone, Copy)]
pub struct MemberTierSeed<'a> {
    pub id: &'a str,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

/// Create the tables if they do not exist yet. Safe to run on every start.
#[instrument(skip(pool))]
pub async fn migrate(pool: &DbPool) -> Result<()> {
    let conn = pool.get().await?;
    conn.batch_execute(SCHEMA).await.map_err(DbError::Migration)?;
    info!("Database schema is up to date");
    Ok(())
}

/// Insert the fixed member tiers. Existing rows are left untouched.
#[instrument(skip(pool, tiers), fields(tiers = tiers.len()))]
pub async fn seed_member_types(pool: &DbPool, tiers: &[MemberTierSeed<'_>]) -> Result<u64> {
    let conn = pool.get().await?;
    let statement = conn
        .prepare(
            "INSERT INTO member_types (id, discount, posts_limit_per_month) \
             VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .await
        .map_err(DbError::Migration)?;

    let mut inserted = 0;
    for tier in tiers {
        inserted += conn
            .execute(&statement, &[&tier.id, &tier.discount, &tier.posts_limit_per_month])
            .await
            .map_err(DbError::Migration)?;
    }

    info!(inserted, "Member tiers seeded");
    Ok(inserted)
}
