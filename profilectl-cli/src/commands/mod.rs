//! Command implementations for the profilectl CLI

pub mod config;
pub mod profile;

use std::path::Path;

use anyhow::{Context, Result};
use profilectl_store::{
    create_pool_with_options, MemoryProfileStore, NewProfile, PgProfileStore, ProfileStore,
    ProfilectlConfig, User, UserId,
};
use serde::Deserialize;
use tracing::info;

use crate::StoreArgs;

/// Contents of a `--seed` file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub profiles: Vec<SeedProfile>,
}

#[derive(Debug, Deserialize)]
pub struct SeedProfile {
    pub user_id: UserId,
    #[serde(flatten)]
    pub profile: NewProfile,
}

/// Open the configured store: in-memory with `--memory`, PostgreSQL otherwise.
pub async fn open_store(
    args: &StoreArgs,
    config: &ProfilectlConfig,
) -> Result<Box<dyn ProfileStore>> {
    if args.memory {
        let store = match &args.seed {
            Some(path) => seeded_store(path).await?,
            None => MemoryProfileStore::new(),
        };
        return Ok(Box::new(store));
    }

    let database_url = config
        .database_url(args.database_url.as_deref())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.profilectl/config.toml")?;

    let pool = create_pool_with_options(&database_url, config.database.pool_settings())
        .await
        .context("Failed to create database pool")?;

    Ok(Box::new(PgProfileStore::new(pool)))
}

async fn seeded_store(path: &Path) -> Result<MemoryProfileStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let seed: SeedData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;

    let user_count = seed.users.len();
    let store = MemoryProfileStore::with_users(seed.users);
    for entry in seed.profiles {
        store
            .create_user_profile(&entry.user_id, entry.profile)
            .await
            .with_context(|| format!("Failed to seed profile for {}", entry.user_id))?;
    }

    info!(users = user_count, "seeded in-memory store");
    Ok(store)
}
