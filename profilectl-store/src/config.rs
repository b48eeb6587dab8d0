//! Configuration for profilectl
//!
//! Loaded from `~/.profilectl/config.toml`; a missing file yields defaults.
//! `${VAR}` references are expanded from the process environment, so call
//! [`load_dotenv`] first when `.env` files should take part.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::db::PoolSettings;

/// `${NAME}` placeholder
static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid var regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilectlConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let pool = PoolSettings::default();
        Self {
            url: None,
            max_connections: pool.max_connections,
            acquire_timeout_secs: pool.acquire_timeout.as_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ProfilectlConfig {
    /// Load the config file at the default path.
    ///
    /// `.env` files are not read here; see [`load_dotenv`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path. Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;

        config.expand_variables(&env::vars().collect());
        Ok(config)
    }

    /// Config directory: ~/.profilectl
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".profilectl")
    }

    /// Config file path: ~/.profilectl/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Database URL: explicit override first, then the config file.
    ///
    /// Unresolved or empty values count as unset.
    pub fn database_url(&self, override_url: Option<&str>) -> Option<String> {
        override_url
            .map(str::to_owned)
            .or_else(|| self.database.url.clone())
            .filter(|url| !url.is_empty() && !url.contains("${"))
    }

    fn expand_variables(&mut self, vars: &HashMap<String, String>) {
        if let Some(ref url) = self.database.url {
            self.database.url = Some(expand_string(url, vars));
        }
        self.logging.level = expand_string(&self.logging.level, vars);
    }
}

/// Replace `${VAR}` with its value; unknown variables are left in place.
fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
    VAR_RE
        .replace_all(s, |caps: &regex::Captures| {
            vars.get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Outcome of [`load_dotenv`]
///
/// Loading usually happens before logging is set up, so the result is kept
/// and reported later with [`DotenvReport::log`].
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    pub fn log(&self) {
        for (path, err) in &self.failed {
            warn!("Failed to load {}: {}", path.display(), err);
        }

        if self.loaded.is_empty() {
            debug!("No .env files found (current dir or ~/.profilectl)");
        } else {
            let paths: Vec<_> = self.loaded.iter().map(|p| p.display().to_string()).collect();
            info!("Loaded environment from: {}", paths.join(", "));
        }
    }
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.profilectl/.env
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    if let Ok(path) = dotenvy::dotenv() {
        report.loaded.push(path);
    }

    let env_file = ProfilectlConfig::config_dir().join(".env");
    if env_file.exists() {
        load_env_file(&env_file, &mut report);
    }

    report
}

fn load_env_file(path: &Path, report: &mut DotenvReport) {
    // dotenvy doesn't overwrite existing vars
    match dotenvy::from_path(path) {
        Ok(()) => report.loaded.push(path.to_path_buf()),
        Err(e) => report.failed.push((path.to_path_buf(), e.to_string())),
    }
}
