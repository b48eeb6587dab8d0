//! Profile store trait and the PostgreSQL implementation
//!
//! Callers hold a `dyn ProfileStore` so the backing handle is injected:
//! - `PgProfileStore` for a live database
//! - `MemoryProfileStore` for tests and offline runs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::ProfileRepo;
use crate::error::StoreResult;
use crate::models::{
    DeleteAck, FullUserProfile, NewProfile, ProfilePatch, ProfileSearchHit, ProfileSummary,
    SearchQuery, UserId, UserProfile,
};

/// The profile operations, independent of backend
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_full_user_with_profile(
        &self,
        user_id: &UserId,
    ) -> StoreResult<Option<FullUserProfile>>;

    async fn create_user_profile(
        &self,
        user_id: &UserId,
        data: NewProfile,
    ) -> StoreResult<UserProfile>;

    async fn update_user_profile(
        &self,
        user_id: &UserId,
        data: ProfilePatch,
    ) -> StoreResult<Option<UserProfile>>;

    async fn delete_user_profile(&self, user_id: &UserId) -> StoreResult<DeleteAck>;

    async fn list_all_profiles(&self) -> StoreResult<Vec<ProfileSummary>>;

    async fn search_profiles(&self, query: &SearchQuery) -> StoreResult<Vec<ProfileSearchHit>>;
}

/// PostgreSQL-backed store; cloning shares the pool
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn repo(&self) -> ProfileRepo<'_> {
        ProfileRepo::new(&self.pool)
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_full_user_with_profile(
        &self,
        user_id: &UserId,
    ) -> StoreResult<Option<FullUserProfile>> {
        self.repo().get_full_user_with_profile(user_id).await
    }

    async fn create_user_profile(
        &self,
        user_id: &UserId,
        data: NewProfile,
    ) -> StoreResult<UserProfile> {
        self.repo().create_user_profile(user_id, data).await
    }

    async fn update_user_profile(
        &self,
        user_id: &UserId,
        data: ProfilePatch,
    ) -> StoreResult<Option<UserProfile>> {
        self.repo().update_user_profile(user_id, data).await
    }

    async fn delete_user_profile(&self, user_id: &UserId) -> StoreResult<DeleteAck> {
        self.repo().delete_user_profile(user_id).await
    }

    async fn list_all_profiles(&self) -> StoreResult<Vec<ProfileSummary>> {
        self.repo().list_all_profiles().await
    }

    async fn search_profiles(&self, query: &SearchQuery) -> StoreResult<Vec<ProfileSearchHit>> {
        self.repo().search_profiles(query).await
    }
}
