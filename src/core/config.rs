//! Configuration management with layered hierarchy
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Global user config (`<config dir>/issue-import/config.yaml`)
//! 3. Environment variables
//!
//! The repository and access token are only ever taken from the environment.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::repo::{RepoSlug, RepoSlugError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_API_URL: &str = "GITHUB_API_URL";
pub const ENV_LABEL_COLOR: &str = "ISSUE_IMPORT_LABEL_COLOR";

/// Optional settings read from the global config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// REST API base (GitHub Enterprise installs use `https://host/api/v3`)
    pub api_url: Option<String>,

    /// Color for labels created by the importer
    pub label_color: Option<String>,

    /// Default assignee when `--assignee` is not given
    pub assignee: Option<String>,
}

impl FileConfig {
    /// Read the global config file; a missing or unreadable file yields defaults
    pub fn load() -> Self {
        let Some(path) = Self::global_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_yml::from_str::<FileConfig>(&contents).ok())
            .unwrap_or_default()
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "issue-import")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{} must be set", .0.join(" and "))]
    MissingEnv(Vec<&'static str>),

    #[error(transparent)]
    InvalidRepository(#[from] RepoSlugError),
}

/// Process-wide settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: RepoSlug,
    pub token: String,
    pub api_url: String,
    pub label_color: String,
    pub assignee: Option<String>,
}

impl Config {
    /// Load configuration from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(FileConfig::load(), |key| std::env::var(key).ok())
    }

    /// Merge a file config with an environment lookup (environment wins)
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let repo = lookup(ENV_REPOSITORY);
        let token = lookup(ENV_TOKEN);
        let (repo, token) = match (repo, token) {
            (Some(repo), Some(token)) => (repo, token),
            (repo, token) => {
                let mut missing = Vec::new();
                if repo.is_none() {
                    missing.push(ENV_REPOSITORY);
                }
                if token.is_none() {
                    missing.push(ENV_TOKEN);
                }
                return Err(ConfigError::MissingEnv(missing));
            }
        };

        let api_url = lookup(ENV_API_URL)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let label_color = lookup(ENV_LABEL_COLOR)
            .or(file.label_color)
            .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string());

        Ok(Self {
            repo: repo.parse()?,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
            label_color: label_color.trim_start_matches('#').to_string(),
            assignee: file.assignee.filter(|a| !a.is_empty()),
        })
    }
}
