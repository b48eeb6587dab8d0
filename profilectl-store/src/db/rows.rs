//! Row decoding for the profile queries
//!
//! Collections read as NULL decode to empty; the left-joined queries use
//! `profile_user_id` to tell "no profile row" apart from empty columns.

use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};

use crate::models::{
    AvailabilityStatus, FullUserProfile, ProfileDetails, ProfileSearchHit, ProfileSummary, User,
    UserId, UserProfile,
};

fn json_or_default<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: DeserializeOwned + Default,
{
    let value: Option<Json<T>> = row.try_get(column)?;
    Ok(value.map(|Json(inner)| inner).unwrap_or_default())
}

fn array_or_default(row: &PgRow, column: &str) -> Result<Vec<String>, sqlx::Error> {
    let value: Option<Vec<String>> = row.try_get(column)?;
    Ok(value.unwrap_or_default())
}

fn status_or_default(row: &PgRow) -> Result<AvailabilityStatus, sqlx::Error> {
    let value: Option<AvailabilityStatus> = row.try_get("availability_status")?;
    Ok(value.unwrap_or_default())
}

fn details_from_row(row: &PgRow) -> Result<ProfileDetails, sqlx::Error> {
    Ok(ProfileDetails {
        display_name: row.try_get("display_name")?,
        headline: row.try_get("headline")?,
        location: row.try_get("location")?,
        company: row.try_get("company")?,
        website: row.try_get("website")?,
        twitter_username: row.try_get("twitter_username")?,
        github_username: row.try_get("github_username")?,
        linkedin_url: row.try_get("linkedin_url")?,
        youtube_channel: row.try_get("youtube_channel")?,
        skills: array_or_default(row, "skills")?,
        expertise_levels: json_or_default(row, "expertise_levels")?,
        achievements: json_or_default(row, "achievements")?,
        portfolio_urls: array_or_default(row, "portfolio_urls")?,
        social_links: json_or_default(row, "social_links")?,
        learning_goals: array_or_default(row, "learning_goals")?,
        preferred_topics: array_or_default(row, "preferred_topics")?,
        availability_status: status_or_default(row)?,
    })
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
            image: row.try_get("image")?,
            last_login: row.try_get("last_login")?,
            timezone: row.try_get("timezone")?,
            locale: row.try_get("locale")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserProfile {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let details = details_from_row(row)?;
        Ok(Self {
            user_id: row.try_get("user_id")?,
            display_name: details.display_name,
            headline: details.headline,
            location: details.location,
            company: details.company,
            website: details.website,
            twitter_username: details.twitter_username,
            github_username: details.github_username,
            linkedin_url: details.linkedin_url,
            youtube_channel: details.youtube_channel,
            skills: details.skills,
            expertise_levels: details.expertise_levels,
            achievements: details.achievements,
            portfolio_urls: details.portfolio_urls,
            social_links: details.social_links,
            learning_goals: details.learning_goals,
            preferred_topics: details.preferred_topics,
            availability_status: details.availability_status,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for FullUserProfile {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let user = User::from_row(row)?;
        let profile_user_id: Option<UserId> = row.try_get("profile_user_id")?;
        let profile = match profile_user_id {
            Some(_) => Some(details_from_row(row)?),
            None => None,
        };
        Ok(Self { user, profile })
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            headline: row.try_get("headline")?,
            skills: row.try_get("skills")?,
            availability_status: row.try_get("availability_status")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileSearchHit {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            display_name: row.try_get("display_name")?,
            skills: row.try_get("skills")?,
        })
    }
}
