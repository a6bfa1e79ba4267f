//! Core module - rows, tracker access and the import phases

pub mod body;
pub mod config;
pub mod github;
pub mod importer;
pub mod links;
pub mod repo;
pub mod row;
pub mod taxonomy;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, ConfigError, FileConfig};
pub use github::GitHubClient;
pub use importer::{ImportOptions, ImportOutcome, ImportStats, Importer};
pub use links::{LinkGraph, RemoteId, RemoteIds};
pub use repo::RepoSlug;
pub use row::{load_rows, Row, RowError};
pub use tracker::{IssueTracker, TrackerError};
