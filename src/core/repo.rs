//! Repository identifier parsing

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A repository identifier in `<owner>/<name>` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid repository '{0}': expected <owner>/<name>")]
pub struct RepoSlugError(pub String);

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let Some((owner, name)) = trimmed.split_once('/') else {
            return Err(RepoSlugError(trimmed.to_string()));
        };

        if owner.is_empty() || name.is_empty() {
            return Err(RepoSlugError(trimmed.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
