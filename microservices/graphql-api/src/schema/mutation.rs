//! Mutation root: create and delete for users, posts and profiles
//!
//! Member tiers are read-only. Each mutation is a single, independent store
//! call; a failing delete surfaces the store's not-found error.

use async_graphql::{Context, ErrorExtensions, Object, Result};
use tracing::info;

use super::inputs::{CreatePostInput, CreateProfileInput, CreateUserInput};
use super::scalars::UuidScalar;
use super::store;
use super::types::{PostGql, ProfileGql, UserGql};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<UserGql> {
        let user = store(ctx)?
            .create_user(dto.into())
            .await
            .map_err(|e| e.extend())?;
        info!(user_id = %user.id, "createUser");
        Ok(UserGql(user))
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<UuidScalar> {
        let deleted = store(ctx)?
            .delete_user(id.into())
            .await
            .map_err(|e| e.extend())?;
        info!(user_id = %deleted, "deleteUser");
        Ok(deleted.into())
    }

    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<PostGql> {
        let post = store(ctx)?
            .create_post(dto.into())
            .await
            .map_err(|e| e.extend())?;
        info!(post_id = %post.id, author_id = %post.author_id, "createPost");
        Ok(PostGql(post))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<UuidScalar> {
        let deleted = store(ctx)?
            .delete_post(id.into())
            .await
            .map_err(|e| e.extend())?;
        info!(post_id = %deleted, "deletePost");
        Ok(deleted.into())
    }

    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        dto: CreateProfileInput,
    ) -> Result<ProfileGql> {
        let profile = store(ctx)?
            .create_profile(dto.into())
            .await
            .map_err(|e| e.extend())?;
        info!(profile_id = %profile.id, user_id = %profile.user_id, "createProfile");
        Ok(ProfileGql(profile))
    }

    async fn delete_profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<UuidScalar> {
        let deleted = store(ctx)?
            .delete_profile(id.into())
            .await
            .map_err(|e| e.extend())?;
        info!(profile_id = %deleted, "deleteProfile");
        Ok(deleted.into())
    }
}
