//! Input objects for the create mutations

use async_graphql::InputObject;

use super::scalars::{MemberTypeIdGql, UuidScalar};
use crate::domain::{NewPost, NewProfile, NewUser};

#[derive(InputObject, Debug)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for NewUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

#[derive(InputObject, Debug)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: UuidScalar,
}

impl From<CreatePostInput> for NewPost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: input.author_id.into(),
        }
    }
}

#[derive(InputObject, Debug)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: UuidScalar,
    pub member_type_id: MemberTypeIdGql,
}

impl From<CreateProfileInput> for NewProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id.into(),
            member_type_id: input.member_type_id.into(),
        }
    }
}
