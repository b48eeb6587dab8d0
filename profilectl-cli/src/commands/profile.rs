//! Profile commands: get, create, update, delete, list, search
//!
//! Create and update read a JSON body from `--file` (or `-` for stdin) and
//! apply field flags on top of it.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use profilectl_store::{
    AvailabilityStatus, NewProfile, Patch, ProfilePatch, ProfileStore, SearchQuery, UserId,
};
use serde::de::DeserializeOwned;

use crate::output::{self, OutputFormat};

// ============================================================================
// Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// User id
    pub user_id: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// User id
    pub user_id: String,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text matched against username, display name, or an exact skill
    /// (used as given; empty matches everyone)
    pub query: String,
}

/// Field flags shared by create and update
#[derive(Parser, Debug, Default)]
pub struct FieldArgs {
    /// JSON body file (`-` reads stdin)
    #[arg(long, short, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Display name
    #[arg(long)]
    pub display_name: Option<String>,

    /// One-line headline
    #[arg(long)]
    pub headline: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Company
    #[arg(long)]
    pub company: Option<String>,

    /// Website URL
    #[arg(long)]
    pub website: Option<String>,

    /// Availability (active, away, busy, offline, or any other text)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<AvailabilityStatus>,

    /// Skill (repeatable; replaces the whole skill list)
    #[arg(long = "skill", value_name = "SKILL")]
    pub skills: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// User id
    pub user_id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// User id
    pub user_id: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Set the skill list to empty
    #[arg(long, conflicts_with = "skills")]
    pub clear_skills: bool,
}

fn parse_status(s: &str) -> Result<AvailabilityStatus, String> {
    s.parse().map_err(|e: profilectl_store::ValidationError| e.to_string())
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    UserId::new(raw).with_context(|| format!("Invalid user id '{}'", raw))
}

/// Read a JSON body from a file or stdin; no file means the default value.
fn read_body<T: DeserializeOwned + Default>(file: Option<&PathBuf>) -> Result<T> {
    let Some(path) = file else {
        return Ok(T::default());
    };

    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).context("Failed to parse JSON body")
}

impl FieldArgs {
    fn into_new_profile(self) -> Result<NewProfile> {
        let mut data: NewProfile = read_body(self.file.as_ref())?;
        if self.display_name.is_some() {
            data.display_name = self.display_name;
        }
        if self.headline.is_some() {
            data.headline = self.headline;
        }
        if self.location.is_some() {
            data.location = self.location;
        }
        if self.company.is_some() {
            data.company = self.company;
        }
        if self.website.is_some() {
            data.website = self.website;
        }
        if self.status.is_some() {
            data.availability_status = self.status;
        }
        if !self.skills.is_empty() {
            data.skills = Some(self.skills);
        }
        Ok(data)
    }

    fn into_patch(self, clear_skills: bool) -> Result<ProfilePatch> {
        let mut patch: ProfilePatch = read_body(self.file.as_ref())?;
        if let Some(v) = self.display_name {
            patch.display_name = Patch::Set(v);
        }
        if let Some(v) = self.headline {
            patch.headline = Patch::Set(v);
        }
        if let Some(v) = self.location {
            patch.location = Patch::Set(v);
        }
        if let Some(v) = self.company {
            patch.company = Patch::Set(v);
        }
        if let Some(v) = self.website {
            patch.website = Patch::Set(v);
        }
        if let Some(v) = self.status {
            patch.availability_status = Patch::Set(v);
        }
        if clear_skills {
            patch.skills = Patch::Set(Vec::new());
        } else if !self.skills.is_empty() {
            patch.skills = Patch::Set(self.skills);
        }
        Ok(patch)
    }
}

// ============================================================================
// Commands
// ============================================================================

pub async fn run_get(store: &dyn ProfileStore, args: GetArgs, format: OutputFormat) -> Result<()> {
    let user_id = parse_user_id(&args.user_id)?;
    let full = store.get_full_user_with_profile(&user_id).await?;

    output::emit(format, &full, || match &full {
        Some(full) => output::render_full(full),
        None => format!("No user with id '{}'", user_id),
    })
}

pub async fn run_create(
    store: &dyn ProfileStore,
    args: CreateArgs,
    format: OutputFormat,
) -> Result<()> {
    let user_id = parse_user_id(&args.user_id)?;
    let data = args.fields.into_new_profile()?;

    let profile = store
        .create_user_profile(&user_id, data)
        .await
        .with_context(|| format!("Failed to create profile for {}", user_id))?;

    output::emit(format, &profile, || output::render_profile(&profile))
}

pub async fn run_update(
    store: &dyn ProfileStore,
    args: UpdateArgs,
    format: OutputFormat,
) -> Result<()> {
    let user_id = parse_user_id(&args.user_id)?;
    let patch = args.fields.into_patch(args.clear_skills)?;

    let profile = store
        .update_user_profile(&user_id, patch)
        .await
        .with_context(|| format!("Failed to update profile for {}", user_id))?;

    output::emit(format, &profile, || match &profile {
        Some(profile) => output::render_profile(profile),
        None => format!("No profile for '{}'", user_id),
    })
}

pub async fn run_delete(
    store: &dyn ProfileStore,
    args: DeleteArgs,
    format: OutputFormat,
) -> Result<()> {
    let user_id = parse_user_id(&args.user_id)?;
    let ack = store.delete_user_profile(&user_id).await?;

    output::emit(format, &ack, || output::render_ack(&ack, user_id.as_str()))
}

pub async fn run_list(store: &dyn ProfileStore, format: OutputFormat) -> Result<()> {
    let rows = store.list_all_profiles().await?;
    output::emit(format, &rows, || output::render_summaries(&rows))
}

pub async fn run_search(
    store: &dyn ProfileStore,
    args: SearchArgs,
    format: OutputFormat,
) -> Result<()> {
    let query = SearchQuery::new(args.query);
    let hits = store.search_profiles(&query).await?;
    output::emit(format, &hits, || output::render_hits(&hits))
}
