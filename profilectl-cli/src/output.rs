//! Output rendering (human text or JSON)

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use profilectl_store::{
    DeleteAck, FullUserProfile, ProfileSearchHit, ProfileSummary, UserProfile,
};
use serde::Serialize;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

/// Print `value` as pretty JSON, or the human rendering.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    human: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            let text = human();
            if !text.is_empty() {
                println!("{}", text.trim_end());
            }
        }
    }
    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

pub fn render_full(full: &FullUserProfile) -> String {
    let user = &full.user;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", opt(&user.username), user.id);
    let _ = writeln!(out, "  email:       {}", opt(&user.email));
    let _ = writeln!(out, "  name:        {}", opt(&user.name));
    let _ = writeln!(out, "  timezone:    {}", opt(&user.timezone));
    let _ = writeln!(out, "  locale:      {}", opt(&user.locale));
    let _ = writeln!(out, "  last login:  {}", timestamp(user.last_login));

    match &full.profile {
        None => {
            let _ = writeln!(out, "  profile:     (none)");
        }
        Some(p) => {
            let _ = writeln!(out, "  display:     {}", opt(&p.display_name));
            let _ = writeln!(out, "  headline:    {}", opt(&p.headline));
            let _ = writeln!(out, "  location:    {}", opt(&p.location));
            let _ = writeln!(out, "  company:     {}", opt(&p.company));
            let _ = writeln!(out, "  website:     {}", opt(&p.website));
            let _ = writeln!(out, "  status:      {}", p.availability_status);
            let _ = writeln!(out, "  skills:      {}", list(&p.skills));
            let _ = writeln!(out, "  goals:       {}", list(&p.learning_goals));
            let _ = writeln!(out, "  topics:      {}", list(&p.preferred_topics));
            for (platform, url) in &p.social_links {
                let _ = writeln!(out, "  link:        {} {}", platform, url);
            }
        }
    }
    out
}

pub fn render_profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "profile for {}", profile.user_id);
    let _ = writeln!(out, "  display:     {}", opt(&profile.display_name));
    let _ = writeln!(out, "  headline:    {}", opt(&profile.headline));
    let _ = writeln!(out, "  status:      {}", profile.availability_status);
    let _ = writeln!(out, "  skills:      {}", list(&profile.skills));
    let _ = writeln!(out, "  updated:     {}", timestamp(profile.updated_at));
    out
}

pub fn render_summaries(rows: &[ProfileSummary]) -> String {
    if rows.is_empty() {
        return "No users.".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let status = row
            .availability_status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "no profile".to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<28} [{}] {}",
            opt(&row.username),
            opt(&row.email),
            status,
            opt(&row.display_name)
        );
    }
    out
}

pub fn render_hits(hits: &[ProfileSearchHit]) -> String {
    if hits.is_empty() {
        return "No matches.".to_string();
    }

    let mut out = String::new();
    for hit in hits {
        let skills = hit.skills.as_deref().map(list).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<28} {}",
            opt(&hit.username),
            opt(&hit.display_name),
            skills
        );
    }
    out
}

pub fn render_ack(ack: &DeleteAck, user_id: &str) -> String {
    if ack.deleted > 0 {
        format!("Deleted profile for {}", user_id)
    } else {
        format!("No profile for {} (nothing to delete)", user_id)
    }
}
