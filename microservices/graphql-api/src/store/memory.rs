//! In-memory data store
//!
//! Mirrors the relational constraints of the PostgreSQL schema so resolver
//! behaviour is the same against either backend.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::{DataStore, StoreError, StoreResult};
use crate::domain::{
    EntityKind, MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, User,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    profiles: HashMap<Uuid, Profile>,
    member_types: HashMap<MemberTypeId, MemberType>,
}

/// Lock-protected tables; each call holds the lock for its whole check-and-write
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store seeded with the fixed member tiers
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for tier in MemberType::seeded() {
            tables.member_types.insert(tier.id, tier);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().users.values().cloned().collect())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            balance: user.balance,
        };
        self.tables.write().users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<Uuid> {
        let mut tables = self.tables.write();
        tables
            .users
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::User, id))?;

        // ON DELETE CASCADE
        tables.posts.retain(|_, post| post.author_id != id);
        tables.profiles.retain(|_, profile| profile.user_id != id);
        debug!(user_id = %id, "User deleted");
        Ok(id)
    }

    async fn post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        Ok(self.tables.read().posts.get(&id).cloned())
    }

    async fn posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.tables.read().posts.values().cloned().collect())
    }

    async fn posts_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Post>> {
        Ok(self
            .tables
            .read()
            .posts
            .values()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&post.author_id) {
            return Err(StoreError::Constraint(format!(
                "Key (author_id)=({}) is not present in table \"users\"",
                post.author_id
            )));
        }

        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
        };
        tables.posts.insert(post.id, post.clone());
        debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<Uuid> {
        self.tables
            .write()
            .posts
            .remove(&id)
            .map(|_| id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Post, id))
    }

    async fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        Ok(self.tables.read().profiles.get(&id).cloned())
    }

    async fn profiles(&self) -> StoreResult<Vec<Profile>> {
        Ok(self.tables.read().profiles.values().cloned().collect())
    }

    async fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        Ok(self
            .tables
            .read()
            .profiles
            .values()
            .find(|profile| profile.user_id == user_id)
            .cloned())
    }

    async fn profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> StoreResult<Vec<Profile>> {
        Ok(self
            .tables
            .read()
            .profiles
            .values()
            .filter(|profile| profile.member_type_id == member_type_id)
            .cloned()
            .collect())
    }

    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&profile.user_id) {
            return Err(StoreError::Constraint(format!(
                "Key (user_id)=({}) is not present in table \"users\"",
                profile.user_id
            )));
        }
        if !tables.member_types.contains_key(&profile.member_type_id) {
            return Err(StoreError::Constraint(format!(
                "Key (member_type_id)=({}) is not present in table \"member_types\"",
                profile.member_type_id
            )));
        }
        if tables.profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(StoreError::Constraint(format!(
                "Key (user_id)=({}) already exists",
                profile.user_id
            )));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: profile.is_male,
            year_of_birth: profile.year_of_birth,
            user_id: profile.user_id,
            member_type_id: profile.member_type_id,
        };
        tables.profiles.insert(profile.id, profile.clone());
        debug!(profile_id = %profile.id, "Profile created");
        Ok(profile)
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<Uuid> {
        self.tables
            .write()
            .profiles
            .remove(&id)
            .map(|_| id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Profile, id))
    }

    async fn member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        Ok(self.tables.read().member_types.get(&id).cloned())
    }

    async fn member_types(&self) -> StoreResult<Vec<MemberType>> {
        let mut tiers: Vec<MemberType> =
            self.tables.read().member_types.values().cloned().collect();
        tiers.sort_by_key(|tier| tier.id.as_str());
        Ok(tiers)
    }
}
