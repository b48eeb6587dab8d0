//! User and profile records, and the inputs that create or patch them

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AvailabilityStatus, Patch, UserId};

/// Account row from `users`. Owned by the account system; read-only here.
///
/// Every column but `id` may be NULL in that table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Stored `user_profiles` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub twitter_username: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_channel: Option<String>,
    pub skills: Vec<String>,
    pub expertise_levels: BTreeMap<String, String>,
    pub achievements: Map<String, Value>,
    pub portfolio_urls: Vec<String>,
    pub social_links: BTreeMap<String, String>,
    pub learning_goals: Vec<String>,
    pub preferred_topics: Vec<String>,
    pub availability_status: AvailabilityStatus,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile half of a joined user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub twitter_username: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_channel: Option<String>,
    pub skills: Vec<String>,
    pub expertise_levels: BTreeMap<String, String>,
    pub achievements: Map<String, Value>,
    pub portfolio_urls: Vec<String>,
    pub social_links: BTreeMap<String, String>,
    pub learning_goals: Vec<String>,
    pub preferred_topics: Vec<String>,
    pub availability_status: AvailabilityStatus,
}

impl From<UserProfile> for ProfileDetails {
    fn from(p: UserProfile) -> Self {
        Self {
            display_name: p.display_name,
            headline: p.headline,
            location: p.location,
            company: p.company,
            website: p.website,
            twitter_username: p.twitter_username,
            github_username: p.github_username,
            linkedin_url: p.linkedin_url,
            youtube_channel: p.youtube_channel,
            skills: p.skills,
            expertise_levels: p.expertise_levels,
            achievements: p.achievements,
            portfolio_urls: p.portfolio_urls,
            social_links: p.social_links,
            learning_goals: p.learning_goals,
            preferred_topics: p.preferred_topics,
            availability_status: p.availability_status,
        }
    }
}

/// User left-joined with their profile; `profile` is `None` when no row exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullUserProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<ProfileDetails>,
}

/// Row of the all-profiles listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    pub availability_status: Option<AvailabilityStatus>,
}

/// Row of a profile search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSearchHit {
    pub id: UserId,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Input for creating a profile
///
/// Omitted collections are stored empty; omitted status is `active`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProfile {
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub twitter_username: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_channel: Option<String>,
    pub skills: Option<Vec<String>>,
    pub expertise_levels: Option<BTreeMap<String, String>>,
    pub achievements: Option<Map<String, Value>>,
    pub portfolio_urls: Option<Vec<String>>,
    pub social_links: Option<BTreeMap<String, String>>,
    pub learning_goals: Option<Vec<String>>,
    pub preferred_topics: Option<Vec<String>>,
    pub availability_status: Option<AvailabilityStatus>,
}

impl NewProfile {
    /// Resolve defaults into the row that will be stored for `user_id`.
    pub fn into_profile(self, user_id: UserId, updated_at: DateTime<Utc>) -> UserProfile {
        UserProfile {
            user_id,
            display_name: self.display_name,
            headline: self.headline,
            location: self.location,
            company: self.company,
            website: self.website,
            twitter_username: self.twitter_username,
            github_username: self.github_username,
            linkedin_url: self.linkedin_url,
            youtube_channel: self.youtube_channel,
            skills: self.skills.unwrap_or_default(),
            expertise_levels: self.expertise_levels.unwrap_or_default(),
            achievements: self.achievements.unwrap_or_default(),
            portfolio_urls: self.portfolio_urls.unwrap_or_default(),
            social_links: self.social_links.unwrap_or_default(),
            learning_goals: self.learning_goals.unwrap_or_default(),
            preferred_topics: self.preferred_topics.unwrap_or_default(),
            availability_status: self.availability_status.unwrap_or_default(),
            updated_at: Some(updated_at),
        }
    }
}

/// Partial update; `Patch::Keep` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub display_name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub headline: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub location: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub company: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub website: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub twitter_username: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub github_username: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub linkedin_url: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub youtube_channel: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub skills: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub expertise_levels: Patch<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub achievements: Patch<Map<String, Value>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub portfolio_urls: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub social_links: Patch<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub learning_goals: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub preferred_topics: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub availability_status: Patch<AvailabilityStatus>,
}

impl ProfilePatch {
    /// True when no field is set. The update still refreshes `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_keep()
            && self.headline.is_keep()
            && self.location.is_keep()
            && self.company.is_keep()
            && self.website.is_keep()
            && self.twitter_username.is_keep()
            && self.github_username.is_keep()
            && self.linkedin_url.is_keep()
            && self.youtube_channel.is_keep()
            && self.skills.is_keep()
            && self.expertise_levels.is_keep()
            && self.achievements.is_keep()
            && self.portfolio_urls.is_keep()
            && self.social_links.is_keep()
            && self.learning_goals.is_keep()
            && self.preferred_topics.is_keep()
            && self.availability_status.is_keep()
    }

    /// Apply the set fields to an in-memory profile. Does not touch `updated_at`.
    pub fn apply_to(self, profile: &mut UserProfile) {
        fn set_opt(patch: Patch<String>, target: &mut Option<String>) {
            patch.map(Some).apply_to(target);
        }

        set_opt(self.display_name, &mut profile.display_name);
        set_opt(self.headline, &mut profile.headline);
        set_opt(self.location, &mut profile.location);
        set_opt(self.company, &mut profile.company);
        set_opt(self.website, &mut profile.website);
        set_opt(self.twitter_username, &mut profile.twitter_username);
        set_opt(self.github_username, &mut profile.github_username);
        set_opt(self.linkedin_url, &mut profile.linkedin_url);
        set_opt(self.youtube_channel, &mut profile.youtube_channel);
        self.skills.apply_to(&mut profile.skills);
        self.expertise_levels.apply_to(&mut profile.expertise_levels);
        self.achievements.apply_to(&mut profile.achievements);
        self.portfolio_urls.apply_to(&mut profile.portfolio_urls);
        self.social_links.apply_to(&mut profile.social_links);
        self.learning_goals.apply_to(&mut profile.learning_goals);
        self.preferred_topics.apply_to(&mut profile.preferred_topics);
        self.availability_status
            .apply_to(&mut profile.availability_status);
    }
}

/// Result of a delete. `success` is true whether or not a row existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
    pub deleted: u64,
}

impl DeleteAck {
    pub fn new(deleted: u64) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}
