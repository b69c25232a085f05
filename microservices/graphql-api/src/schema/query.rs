//! Query root: point lookups and full listings

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::scalars::{MemberTypeIdGql, UuidScalar};
use super::store;
use super::types::{MemberTypeGql, PostGql, ProfileGql, UserGql};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A user by id, or null when absent
    async fn user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<UserGql>> {
        let user = store(ctx)?
            .user(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(user.map(UserGql))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserGql>> {
        let users = store(ctx)?.users().await.map_err(|e| e.extend())?;
        Ok(users.into_iter().map(UserGql).collect())
    }

    /// A post by id, or null when absent
    async fn post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<PostGql>> {
        let post = store(ctx)?
            .post(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(post.map(PostGql))
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostGql>> {
        let posts = store(ctx)?.posts().await.map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostGql).collect())
    }

    /// A profile by id, or null when absent
    async fn profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<ProfileGql>> {
        let profile = store(ctx)?
            .profile(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(profile.map(ProfileGql))
    }

    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<ProfileGql>> {
        let profiles = store(ctx)?.profiles().await.map_err(|e| e.extend())?;
        Ok(profiles.into_iter().map(ProfileGql).collect())
    }

    /// A membership tier by id
    async fn member_type(
        &self,
        ctx: &Context<'_>,
        id: MemberTypeIdGql,
    ) -> Result<Option<MemberTypeGql>> {
        let member_type = store(ctx)?
            .member_type(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(member_type.map(MemberTypeGql))
    }

    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberTypeGql>> {
        let member_types = store(ctx)?
            .member_types()
            .await
            .map_err(|e| e.extend())?;
        Ok(member_types.into_iter().map(MemberTypeGql).collect())
    }
}
