//! Object types mirroring the stored records
//!
//! Relation fields issue one store lookup each, keyed by the parent's id or
//! foreign key. Sibling parents are not batched.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::scalars::{MemberTypeIdGql, UuidScalar};
use super::store;
use crate::domain::{MemberType, Post, Profile, User};

pub struct UserGql(pub User);

#[Object(name = "User")]
impl UserGql {
    async fn id(&self) -> UuidScalar {
        self.0.id.into()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn balance(&self) -> f64 {
        self.0.balance
    }

    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<ProfileGql>> {
        let profile = store(ctx)?
            .profile_by_user(self.0.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(profile.map(ProfileGql))
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostGql>> {
        let posts = store(ctx)?
            .posts_by_author(self.0.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostGql).collect())
    }
}

pub struct ProfileGql(pub Profile);

#[Object(name = "Profile")]
impl ProfileGql {
    async fn id(&self) -> UuidScalar {
        self.0.id.into()
    }

    async fn is_male(&self) -> bool {
        self.0.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.0.year_of_birth
    }

    async fn user_id(&self) -> UuidScalar {
        self.0.user_id.into()
    }

    async fn member_type_id(&self) -> MemberTypeIdGql {
        self.0.member_type_id.into()
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserGql>> {
        let user = store(ctx)?
            .user(self.0.user_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(user.map(UserGql))
    }

    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberTypeGql>> {
        let member_type = store(ctx)?
            .member_type(self.0.member_type_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(member_type.map(MemberTypeGql))
    }
}

pub struct PostGql(pub Post);

#[Object(name = "Post")]
impl PostGql {
    async fn id(&self) -> UuidScalar {
        self.0.id.into()
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_id(&self) -> UuidScalar {
        self.0.author_id.into()
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserGql>> {
        let author = store(ctx)?
            .user(self.0.author_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(author.map(UserGql))
    }
}

pub struct MemberTypeGql(pub MemberType);

#[Object(name = "MemberType")]
impl MemberTypeGql {
    async fn id(&self) -> MemberTypeIdGql {
        self.0.id.into()
    }

    async fn discount(&self) -> f64 {
        self.0.discount
    }

    async fn posts_limit_per_month(&self) -> i32 {
        self.0.posts_limit_per_month
    }

    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<ProfileGql>> {
        let profiles = store(ctx)?
            .profiles_by_member_type(self.0.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(profiles.into_iter().map(ProfileGql).collect())
    }
}
