//! Profile repository
//!
//! Reads users joined with their profile and writes `user_profiles`:
//! - get: LEFT JOIN, `None` when the user is missing
//! - create: plain INSERT, unique constraint rejects a second profile
//! - update: COALESCE per column, `updated_at` always refreshed
//! - delete: idempotent
//! - list / search: LEFT JOIN over all users

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::StoreResult;
use crate::models::{
    DeleteAck, FullUserProfile, NewProfile, ProfilePatch, ProfileSearchHit, ProfileSummary,
    SearchQuery, UserId, UserProfile, SEARCH_LIMIT,
};

/// Columns returned for a stored profile row
const PROFILE_COLUMNS: &str = "user_id, display_name, headline, location, company, website, \
     twitter_username, github_username, linkedin_url, youtube_channel, \
     skills, expertise_levels, achievements, portfolio_urls, \
     social_links, learning_goals, preferred_topics, availability_status, updated_at";

const GET_FULL_USER_SQL: &str = r#"
    SELECT
        u.id,
        u.username,
        u.email,
        u.name,
        u.bio,
        u.image,
        u.last_login,
        u.timezone,
        u.locale,
        u.created_at,
        up.user_id AS profile_user_id,
        up.display_name,
        up.headline,
        up.location,
        up.company,
        up.website,
        up.twitter_username,
        up.github_username,
        up.linkedin_url,
        up.youtube_channel,
        up.skills,
        up.expertise_levels,
        up.achievements,
        up.portfolio_urls,
        up.social_links,
        up.learning_goals,
        up.preferred_topics,
        up.availability_status
    FROM users u
    LEFT JOIN user_profiles up ON up.user_id = u.id
    WHERE u.id = $1
    LIMIT 1
"#;

const LIST_ALL_SQL: &str = r#"
    SELECT
        u.id,
        u.username,
        u.email,
        up.display_name,
        up.headline,
        up.skills,
        up.availability_status
    FROM users u
    LEFT JOIN user_profiles up ON up.user_id = u.id
    ORDER BY u.created_at DESC
"#;

/// `$1` is the escaped ILIKE pattern, `$2` the raw text for skill membership.
const SEARCH_SQL: &str = r#"
    SELECT u.id, u.username, up.display_name, up.skills
    FROM users u
    LEFT JOIN user_profiles up ON up.user_id = u.id
    WHERE
        u.username ILIKE $1 OR
        up.display_name ILIKE $1 OR
        $2 = ANY(up.skills)
    LIMIT $3
"#;

const DELETE_SQL: &str = "DELETE FROM user_profiles WHERE user_id = $1";

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO user_profiles (
            user_id, display_name, headline, location, company, website,
            twitter_username, github_username, linkedin_url, youtube_channel,
            skills, expertise_levels, achievements, portfolio_urls,
            social_links, learning_goals, preferred_topics, availability_status,
            updated_at
        )
        VALUES (
            $1, $2, $3, $4, $5, $6,
            $7, $8, $9, $10,
            $11, $12, $13, $14,
            $15, $16, $17, $18,
            NOW()
        )
        RETURNING {PROFILE_COLUMNS}
        "#
    )
}

/// JSON parameters bind as `jsonb`; the stored column may be `json` or
/// `jsonb`, so it is cast before COALESCE and assigned back through the
/// assignment cast.
fn update_sql() -> String {
    format!(
        r#"
        UPDATE user_profiles
        SET
            display_name = COALESCE($2, display_name),
            headline = COALESCE($3, headline),
            location = COALESCE($4, location),
            company = COALESCE($5, company),
            website = COALESCE($6, website),
            twitter_username = COALESCE($7, twitter_username),
            github_username = COALESCE($8, github_username),
            linkedin_url = COALESCE($9, linkedin_url),
            youtube_channel = COALESCE($10, youtube_channel),
            skills = COALESCE($11, skills),
            expertise_levels = COALESCE($12, expertise_levels::jsonb),
            achievements = COALESCE($13, achievements::jsonb),
            portfolio_urls = COALESCE($14, portfolio_urls),
            social_links = COALESCE($15, social_links::jsonb),
            learning_goals = COALESCE($16, learning_goals),
            preferred_topics = COALESCE($17, preferred_topics),
            availability_status = COALESCE($18, availability_status),
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    )
}

/// Profile repository over an injected pool
pub struct ProfileRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user joined with their profile.
    ///
    /// `None` when no user has this id; `profile` is `None` when the user
    /// has no profile row.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get_full_user_with_profile(
        &self,
        user_id: &UserId,
    ) -> StoreResult<Option<FullUserProfile>> {
        let row = sqlx::query_as::<_, FullUserProfile>(GET_FULL_USER_SQL)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        debug!(found = row.is_some(), "fetched user with profile");
        Ok(row)
    }

    /// Insert a profile, applying defaults for omitted fields.
    ///
    /// A second profile for the same user fails on the unique constraint;
    /// the driver error is returned as-is.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn create_user_profile(
        &self,
        user_id: &UserId,
        data: NewProfile,
    ) -> StoreResult<UserProfile> {
        let sql = insert_sql();
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(user_id)
            .bind(data.display_name)
            .bind(data.headline)
            .bind(data.location)
            .bind(data.company)
            .bind(data.website)
            .bind(data.twitter_username)
            .bind(data.github_username)
            .bind(data.linkedin_url)
            .bind(data.youtube_channel)
            .bind(data.skills.unwrap_or_default())
            .bind(Json(data.expertise_levels.unwrap_or_default()))
            .bind(Json(data.achievements.unwrap_or_default()))
            .bind(data.portfolio_urls.unwrap_or_default())
            .bind(Json(data.social_links.unwrap_or_default()))
            .bind(data.learning_goals.unwrap_or_default())
            .bind(data.preferred_topics.unwrap_or_default())
            .bind(data.availability_status.unwrap_or_default())
            .fetch_one(self.pool)
            .await?;

        debug!("created profile");
        Ok(profile)
    }

    /// Coalesce-update: unset fields keep their stored value.
    ///
    /// `None` when the user has no profile row.
    #[instrument(skip_all, fields(user_id = %user_id, empty_patch = data.is_empty()))]
    pub async fn update_user_profile(
        &self,
        user_id: &UserId,
        data: ProfilePatch,
    ) -> StoreResult<Option<UserProfile>> {
        let sql = update_sql();
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(user_id)
            .bind(data.display_name.into_option())
            .bind(data.headline.into_option())
            .bind(data.location.into_option())
            .bind(data.company.into_option())
            .bind(data.website.into_option())
            .bind(data.twitter_username.into_option())
            .bind(data.github_username.into_option())
            .bind(data.linkedin_url.into_option())
            .bind(data.youtube_channel.into_option())
            .bind(data.skills.into_option())
            .bind(data.expertise_levels.into_option().map(Json))
            .bind(data.achievements.into_option().map(Json))
            .bind(data.portfolio_urls.into_option())
            .bind(data.social_links.into_option().map(Json))
            .bind(data.learning_goals.into_option())
            .bind(data.preferred_topics.into_option())
            .bind(data.availability_status.into_option())
            .fetch_optional(self.pool)
            .await?;

        debug!(updated = profile.is_some(), "updated profile");
        Ok(profile)
    }

    /// Delete the user's profile. Succeeds when there is nothing to delete.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn delete_user_profile(&self, user_id: &UserId) -> StoreResult<DeleteAck> {
        let result = sqlx::query(DELETE_SQL)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        debug!(deleted = result.rows_affected(), "deleted profile");
        Ok(DeleteAck::new(result.rows_affected()))
    }

    /// All users with their profile summary, newest user first.
    #[instrument(skip_all)]
    pub async fn list_all_profiles(&self) -> StoreResult<Vec<ProfileSummary>> {
        let rows = sqlx::query_as::<_, ProfileSummary>(LIST_ALL_SQL)
            .fetch_all(self.pool)
            .await?;

        debug!(count = rows.len(), "listed profiles");
        Ok(rows)
    }

    /// Case-insensitive substring match on username or display name, or
    /// exact skill membership. At most 20 rows, in database order.
    #[instrument(skip_all, fields(query = %query.as_str()))]
    pub async fn search_profiles(&self, query: &SearchQuery) -> StoreResult<Vec<ProfileSearchHit>> {
        let rows = sqlx::query_as::<_, ProfileSearchHit>(SEARCH_SQL)
            .bind(query.like_pattern())
            .bind(query.as_str())
            .bind(SEARCH_LIMIT)
            .fetch_all(self.pool)
            .await?;

        debug!(count = rows.len(), "searched profiles");
        Ok(rows)
    }
}
