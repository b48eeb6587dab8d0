//! In-memory profile store
//!
//! Mirrors the PostgreSQL repository's observable behaviour so callers and
//! tests can run without a database. Users are seeded with `insert_user`.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    DeleteAck, FullUserProfile, NewProfile, ProfileDetails, ProfilePatch, ProfileSearchHit,
    ProfileSummary, SearchQuery, User, UserId, UserProfile, SEARCH_LIMIT,
};
use crate::store::ProfileStore;

#[derive(Default)]
struct Inner {
    /// Insertion order doubles as "database default" order for search
    users: Vec<User>,
    profiles: HashMap<UserId, UserProfile>,
}

impl Inner {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }
}

/// Profile store held in process memory
#[derive(Default)]
pub struct MemoryProfileStore {
    inner: RwLock<Inner>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded with users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut store = Self::default();
        {
            let inner = store.inner.get_mut();
            for user in users {
                upsert_user(inner, user);
            }
        }
        store
    }

    /// Add or replace a user row.
    pub async fn insert_user(&self, user: User) {
        let mut inner = self.inner.write().await;
        upsert_user(&mut inner, user);
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

fn upsert_user(inner: &mut Inner, user: User) {
    match inner.users.iter_mut().find(|u| u.id == user.id) {
        Some(existing) => *existing = user,
        None => inner.users.push(user),
    }
}

/// Next `updated_at`, strictly after the previous one.
fn advance(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_full_user_with_profile(
        &self,
        user_id: &UserId,
    ) -> StoreResult<Option<FullUserProfile>> {
        let inner = self.inner.read().await;
        let Some(user) = inner.user(user_id) else {
            return Ok(None);
        };

        let profile = inner
            .profiles
            .get(user_id)
            .cloned()
            .map(ProfileDetails::from);

        Ok(Some(FullUserProfile {
            user: user.clone(),
            profile,
        }))
    }

    async fn create_user_profile(
        &self,
        user_id: &UserId,
        data: NewProfile,
    ) -> StoreResult<UserProfile> {
        let mut inner = self.inner.write().await;

        if inner.user(user_id).is_none() {
            return Err(StoreError::UnknownUser {
                user_id: user_id.to_string(),
            });
        }
        if inner.profiles.contains_key(user_id) {
            return Err(StoreError::DuplicateProfile {
                user_id: user_id.to_string(),
            });
        }

        let profile = data.into_profile(user_id.clone(), Utc::now());
        inner.profiles.insert(user_id.clone(), profile.clone());
        debug!(user_id = %user_id, "created profile in memory");
        Ok(profile)
    }

    async fn update_user_profile(
        &self,
        user_id: &UserId,
        data: ProfilePatch,
    ) -> StoreResult<Option<UserProfile>> {
        let mut inner = self.inner.write().await;
        let Some(profile) = inner.profiles.get_mut(user_id) else {
            return Ok(None);
        };

        let previous = profile.updated_at;
        data.apply_to(profile);
        profile.updated_at = Some(advance(previous));
        Ok(Some(profile.clone()))
    }

    async fn delete_user_profile(&self, user_id: &UserId) -> StoreResult<DeleteAck> {
        let mut inner = self.inner.write().await;
        let deleted = u64::from(inner.profiles.remove(user_id).is_some());
        Ok(DeleteAck::new(deleted))
    }

    async fn list_all_profiles(&self) -> StoreResult<Vec<ProfileSummary>> {
        let inner = self.inner.read().await;
        let mut users: Vec<&User> = inner.users.iter().collect();
        // ORDER BY created_at DESC puts NULLs first
        users.sort_by_key(|u| (u.created_at.is_some(), Reverse(u.created_at)));

        Ok(users
            .into_iter()
            .map(|user| {
                let profile = inner.profiles.get(&user.id);
                ProfileSummary {
                    id: user.id.clone(),
                    username: user.username.clone(),
                    email: user.email.clone(),
                    display_name: profile.and_then(|p| p.display_name.clone()),
                    headline: profile.and_then(|p| p.headline.clone()),
                    skills: profile.map(|p| p.skills.clone()),
                    availability_status: profile.map(|p| p.availability_status.clone()),
                }
            })
            .collect())
    }

    async fn search_profiles(&self, query: &SearchQuery) -> StoreResult<Vec<ProfileSearchHit>> {
        let inner = self.inner.read().await;

        Ok(inner
            .users
            .iter()
            .filter_map(|user| {
                let profile = inner.profiles.get(&user.id);
                let name_hit = user
                    .username
                    .as_deref()
                    .is_some_and(|name| query.matches_text(name))
                    || profile
                        .and_then(|p| p.display_name.as_deref())
                        .is_some_and(|name| query.matches_text(name));
                let skill_hit =
                    profile.is_some_and(|p| p.skills.iter().any(|s| s == query.as_str()));

                (name_hit || skill_hit).then(|| ProfileSearchHit {
                    id: user.id.clone(),
                    username: user.username.clone(),
                    display_name: profile.and_then(|p| p.display_name.clone()),
                    skills: profile.map(|p| p.skills.clone()),
                })
            })
            .take(SEARCH_LIMIT as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityStatus, Patch};
    use chrono::TimeZone;

    fn user(id: &str, username: &str, created_secs: i64) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Some(username.to_string()),
            email: Some(format!("{}@example.com", username)),
            name: None,
            bio: None,
            image: None,
            last_login: None,
            timezone: Some("UTC".into()),
            locale: Some("en".into()),
            created_at: Some(Utc.timestamp_opt(1_700_000_000 + created_secs, 0).unwrap()),
        }
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn get_unknown_user_is_none() {
        let store = MemoryProfileStore::new();
        let result = store.get_full_user_with_profile(&uid("ghost")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_user_without_profile() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let full = store
            .get_full_user_with_profile(&uid("u1"))
            .await
            .unwrap()
            .expect("user exists");

        assert_eq!(full.user.username.as_deref(), Some("ada"));
        assert_eq!(full.user.timezone.as_deref(), Some("UTC"));
        assert!(full.profile.is_none());
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let profile = store
            .create_user_profile(&uid("u1"), NewProfile::default())
            .await
            .unwrap();

        assert!(profile.skills.is_empty());
        assert!(profile.expertise_levels.is_empty());
        assert!(profile.achievements.is_empty());
        assert!(profile.social_links.is_empty());
        assert_eq!(profile.availability_status, AvailabilityStatus::Active);

        let full = store
            .get_full_user_with_profile(&uid("u1"))
            .await
            .unwrap()
            .unwrap();
        assert!(full.profile.is_some());
    }

    #[tokio::test]
    async fn create_twice_is_unique_violation() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        store
            .create_user_profile(&uid("u1"), NewProfile::default())
            .await
            .unwrap();

        let err = store
            .create_user_profile(&uid("u1"), NewProfile::default())
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn create_for_unknown_user_fails() {
        let store = MemoryProfileStore::new();
        let err = store
            .create_user_profile(&uid("ghost"), NewProfile::default())
            .await
            .unwrap_err();
        assert!(err.is_missing_user());
    }

    #[tokio::test]
    async fn update_keeps_omitted_fields_and_advances_timestamp() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let created = store
            .create_user_profile(
                &uid("u1"),
                NewProfile {
                    display_name: Some("Ada".into()),
                    headline: Some("Engineer".into()),
                    skills: Some(vec!["rust".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = store
            .update_user_profile(
                &uid("u1"),
                ProfilePatch {
                    headline: Patch::Set("Staff Engineer".into()),
                    availability_status: Patch::Set(AvailabilityStatus::Busy),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("profile exists");

        assert_eq!(updated.display_name, created.display_name);
        assert_eq!(updated.skills, created.skills);
        assert_eq!(updated.headline.as_deref(), Some("Staff Engineer"));
        assert_eq!(updated.availability_status, AvailabilityStatus::Busy);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn empty_patch_still_advances_timestamp() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let created = store
            .create_user_profile(&uid("u1"), NewProfile::default())
            .await
            .unwrap();

        let first = store
            .update_user_profile(&uid("u1"), ProfilePatch::default())
            .await
            .unwrap()
            .unwrap();
        let second = store
            .update_user_profile(&uid("u1"), ProfilePatch::default())
            .await
            .unwrap()
            .unwrap();

        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(
            ProfileDetails::from(second),
            ProfileDetails::from(created)
        );
    }

    #[tokio::test]
    async fn update_without_profile_is_none() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let result = store
            .update_user_profile(&uid("u1"), ProfilePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        store
            .create_user_profile(&uid("u1"), NewProfile::default())
            .await
            .unwrap();

        let first = store.delete_user_profile(&uid("u1")).await.unwrap();
        assert!(first.success);
        assert_eq!(first.deleted, 1);

        let second = store.delete_user_profile(&uid("u1")).await.unwrap();
        assert!(second.success);
        assert_eq!(second.deleted, 0);

        let never = store.delete_user_profile(&uid("ghost")).await.unwrap();
        assert!(never.success);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let store = MemoryProfileStore::with_users([
            user("u1", "oldest", 0),
            user("u3", "newest", 200),
            user("u2", "middle", 100),
        ]);
        store
            .create_user_profile(
                &uid("u2"),
                NewProfile {
                    display_name: Some("Middle".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let rows = store.list_all_profiles().await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.username.as_deref()).collect();
        assert_eq!(names, [Some("newest"), Some("middle"), Some("oldest")]);

        assert_eq!(rows[1].display_name.as_deref(), Some("Middle"));
        assert_eq!(rows[1].availability_status, Some(AvailabilityStatus::Active));
        assert!(rows[0].skills.is_none());
    }

    #[tokio::test]
    async fn list_puts_missing_created_at_first() {
        let mut undated = user("u0", "undated", 0);
        undated.created_at = None;
        let store = MemoryProfileStore::with_users([
            user("u1", "old", 0),
            undated,
            user("u2", "new", 50),
        ]);

        let rows = store.list_all_profiles().await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["u0", "u2", "u1"]);
    }

    #[tokio::test]
    async fn search_matches_names_and_exact_skills() {
        let store = MemoryProfileStore::with_users([
            user("u1", "EngelbertH", 0),
            user("u2", "ada", 1),
            user("u3", "grace", 2),
            user("u4", "linus", 3),
        ]);
        store
            .create_user_profile(
                &uid("u2"),
                NewProfile {
                    display_name: Some("Lead Engineer".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .create_user_profile(
                &uid("u3"),
                NewProfile {
                    skills: Some(vec!["eng".into(), "cobol".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .create_user_profile(
                &uid("u4"),
                NewProfile {
                    skills: Some(vec!["engineering".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let query = SearchQuery::new("eng");
        let hits = store.search_profiles(&query).await.unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();

        // u4 only has "engineering" as a skill, which is not an exact match
        assert_eq!(ids, ["u1", "u2", "u3"]);
    }

    #[tokio::test]
    async fn search_caps_at_twenty() {
        let users = (0..30).map(|i| user(&format!("u{}", i), &format!("engineer{}", i), i));
        let store = MemoryProfileStore::with_users(users);

        let query = SearchQuery::new("ENGINEER");
        let hits = store.search_profiles(&query).await.unwrap();
        assert_eq!(hits.len(), 20);
    }

    #[tokio::test]
    async fn insert_user_replaces_existing() {
        let store = MemoryProfileStore::new();
        store.insert_user(user("u1", "ada", 0)).await;
        store.insert_user(user("u1", "ada_l", 0)).await;

        assert_eq!(store.user_count().await, 1);
        let full = store
            .get_full_user_with_profile(&uid("u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(full.user.username.as_deref(), Some("ada_l"));
    }

    #[tokio::test]
    async fn empty_query_matches_every_named_user() {
        let users = (0..25).map(|i| user(&format!("u{}", i), &format!("user{}", i), i));
        let store = MemoryProfileStore::with_users(users);

        let hits = store.search_profiles(&SearchQuery::new("")).await.unwrap();
        assert_eq!(hits.len(), 20);
    }

    #[tokio::test]
    async fn query_whitespace_is_significant() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        store
            .create_user_profile(
                &uid("u1"),
                NewProfile {
                    skills: Some(vec!["eng".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(store.search_profiles(&SearchQuery::new("eng")).await.unwrap().len(), 1);
        assert!(store.search_profiles(&SearchQuery::new(" eng")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_without_username_or_email() {
        let mut anonymous = user("john doe", "unused", 10);
        anonymous.username = None;
        anonymous.email = None;
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0), anonymous]);
        store
            .create_user_profile(
                &uid("john doe"),
                NewProfile {
                    display_name: Some("Johnny".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let full = store
            .get_full_user_with_profile(&uid("john doe"))
            .await
            .unwrap()
            .unwrap();
        assert!(full.user.username.is_none());
        assert!(full.user.email.is_none());

        let rows = store.list_all_profiles().await.unwrap();
        assert_eq!(rows[0].id.as_str(), "john doe");
        assert!(rows[0].username.is_none());

        let hits = store.search_profiles(&SearchQuery::new("john")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name.as_deref(), Some("Johnny"));
    }

    #[tokio::test]
    async fn unknown_status_round_trips() {
        let store = MemoryProfileStore::with_users([user("u1", "ada", 0)]);
        let status = AvailabilityStatus::Other("open_to_work".into());
        store
            .create_user_profile(
                &uid("u1"),
                NewProfile {
                    availability_status: Some(status.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let rows = store.list_all_profiles().await.unwrap();
        assert_eq!(rows[0].availability_status.as_ref(), Some(&status));

        let updated = store
            .update_user_profile(&uid("u1"), ProfilePatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.availability_status, status);
    }
}
