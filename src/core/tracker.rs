//! Remote issue tracker interface
//!
//! The importer only talks to the tracker through [`IssueTracker`], so the
//! import phases can run against the GitHub client or an in-memory fake.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Items requested per page when listing milestones and labels
pub const PAGE_SIZE: usize = 100;

/// A milestone as returned by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: String,
}

/// A label as returned by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// An issue as returned by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Payload for creating an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

/// Errors that can occur while talking to the tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{method} {url} returned HTTP {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Operations the importer needs from a remote issue tracker
pub trait IssueTracker {
    /// One page (1-based) of milestones, open and closed
    fn list_milestones(&self, page: u32) -> Result<Vec<Milestone>, TrackerError>;

    /// Create an open milestone
    fn create_milestone(&self, title: &str) -> Result<Milestone, TrackerError>;

    /// One page (1-based) of labels
    fn list_labels(&self, page: u32) -> Result<Vec<Label>, TrackerError>;

    fn create_label(&self, name: &str, color: &str) -> Result<Label, TrackerError>;

    fn create_issue(&self, issue: &NewIssue) -> Result<Issue, TrackerError>;

    fn get_issue(&self, number: u64) -> Result<Issue, TrackerError>;

    /// Replace the whole body of an issue, leaving other fields untouched
    fn update_issue_body(&self, number: u64, body: &str) -> Result<Issue, TrackerError>;
}

/// Walk a paged listing until an empty or short page
pub fn collect_pages<T, F>(mut fetch: F) -> Result<Vec<T>, TrackerError>
where
    F: FnMut(u32) -> Result<Vec<T>, TrackerError>,
{
    let mut items = Vec::new();
    let mut page = 1_u32;

    loop {
        let batch = fetch(page)?;
        if batch.is_empty() {
            break;
        }

        let raw_len = batch.len();
        items.extend(batch);

        if raw_len < PAGE_SIZE {
            break;
        }

        page += 1;
    }

    Ok(items)
}
