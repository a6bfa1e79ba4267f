//! GitHub REST client
//!
//! Blocking JSON-over-HTTPS calls against the repository endpoints the
//! importer uses. Every request carries the bearer token, the versioned
//! accept header and a JSON content type. Non-success statuses are returned
//! as [`TrackerError::Status`]; nothing is retried.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::cell::Cell;

use crate::core::config::Config;
use crate::core::repo::RepoSlug;
use crate::core::tracker::{
    Issue, IssueTracker, Label, Milestone, NewIssue, TrackerError, PAGE_SIZE,
};

pub const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("issue-import/", env!("CARGO_PKG_VERSION"));

/// Client for one repository
pub struct GitHubClient {
    api_url: String,
    repo: RepoSlug,
    token: String,
    /// If true, print each request line to stderr before sending
    verbose: bool,
    requests: Cell<usize>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
            verbose: false,
            requests: Cell::new(0),
        }
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Number of HTTP requests issued so far
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    /// Absolute URL for a path under `/repos/<owner>/<name>/`
    pub fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repo.owner, self.repo.name, path
        )
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        ureq::request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", ACCEPT)
            .set("X-GitHub-Api-Version", API_VERSION)
            .set("Content-Type", "application/json")
            .set("User-Agent", USER_AGENT)
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<T, TrackerError> {
        self.requests.set(self.requests.get() + 1);

        if self.verbose {
            eprintln!("  {} {}", method, url);
        }

        let request = self.request(method, url);
        let result = match payload {
            Some(payload) => request.send_json(payload),
            None => request.call(),
        };

        let response = result.map_err(|err| match err {
            ureq::Error::Status(status, response) => TrackerError::Status {
                method,
                url: url.to_string(),
                status,
                message: response
                    .into_string()
                    .map(|text| error_message(&text))
                    .unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => TrackerError::Transport {
                method,
                url: url.to_string(),
                message: transport.to_string(),
            },
        })?;

        response
            .into_json::<T>()
            .map_err(|err| TrackerError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })
    }
}

/// Pull the `message` field out of a GitHub error body, or keep the raw text
fn error_message(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| text.trim().to_string())
}

impl IssueTracker for GitHubClient {
    fn list_milestones(&self, page: u32) -> Result<Vec<Milestone>, TrackerError> {
        let url = self.repo_url(&format!(
            "milestones?state=all&per_page={PAGE_SIZE}&page={page}"
        ));
        self.send("GET", &url, None)
    }

    fn create_milestone(&self, title: &str) -> Result<Milestone, TrackerError> {
        let url = self.repo_url("milestones");
        self.send("POST", &url, Some(json!({ "title": title, "state": "open" })))
    }

    fn list_labels(&self, page: u32) -> Result<Vec<Label>, TrackerError> {
        let url = self.repo_url(&format!("labels?per_page={PAGE_SIZE}&page={page}"));
        self.send("GET", &url, None)
    }

    fn create_label(&self, name: &str, color: &str) -> Result<Label, TrackerError> {
        let url = self.repo_url("labels");
        self.send("POST", &url, Some(json!({ "name": name, "color": color })))
    }

    fn create_issue(&self, issue: &NewIssue) -> Result<Issue, TrackerError> {
        let url = self.repo_url("issues");
        let payload = serde_json::to_value(issue).map_err(|err| TrackerError::Decode {
            url: url.clone(),
            message: err.to_string(),
        })?;
        self.send("POST", &url, Some(payload))
    }

    fn get_issue(&self, number: u64) -> Result<Issue, TrackerError> {
        let url = self.repo_url(&format!("issues/{number}"));
        self.send("GET", &url, None)
    }

    fn update_issue_body(&self, number: u64, body: &str) -> Result<Issue, TrackerError> {
        let url = self.repo_url(&format!("issues/{number}"));
        self.send("PATCH", &url, Some(json!({ "body": body })))
    }
}
