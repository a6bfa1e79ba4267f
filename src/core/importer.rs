//! Import phases
//!
//! A run is four strictly sequential steps over one immutable row slice:
//! ensure the milestone and labels, create one issue per row, annotate rows
//! with their dependencies and parent, then give each parent a subtask
//! checklist. Linking only starts once every row has a remote id.
//!
//! Any tracker error outside label creation aborts the run. Issues created
//! before the failure stay on the tracker.

use console::style;
use std::collections::HashSet;

use crate::core::body::{compose_body, compose_labels, link_annotation, subtasks_block};
use crate::core::links::{LinkGraph, RemoteId, RemoteIds};
use crate::core::row::Row;
use crate::core::taxonomy::{ensure_labels, ensure_milestone, wanted_labels};
use crate::core::tracker::{IssueTracker, NewIssue, TrackerError};

/// Options for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Milestone title; empty means no milestone
    pub milestone: String,
    /// Single assignee for every created issue
    pub assignee: Option<String>,
    /// Color for labels created by the run
    pub label_color: String,
    pub dry_run: bool,
    /// Suppress per-row progress lines
    pub quiet: bool,
}

/// Import statistics
#[derive(Debug, Default)]
pub struct ImportStats {
    pub rows_processed: usize,
    pub items_created: usize,
    pub labels_created: usize,
    pub label_failures: usize,
    pub items_linked: usize,
    pub parents_annotated: usize,
}

/// Result of a completed run
#[derive(Debug)]
pub struct ImportOutcome {
    pub stats: ImportStats,
    /// Local id to remote id, as filled by the creation pass
    pub remote_ids: RemoteIds,
    /// Remote id of each row, in file order
    pub created: Vec<RemoteId>,
}

/// State produced by the creation pass
#[derive(Default)]
struct Creation {
    graph: LinkGraph,
    remote_ids: RemoteIds,
    per_row: Vec<RemoteId>,
}

/// Runs the import phases against a tracker
pub struct Importer<'a, T: IssueTracker + ?Sized> {
    tracker: &'a T,
    rows: &'a [Row],
    options: &'a ImportOptions,
}

impl<'a, T: IssueTracker + ?Sized> Importer<'a, T> {
    pub fn new(tracker: &'a T, rows: &'a [Row], options: &'a ImportOptions) -> Self {
        Self {
            tracker,
            rows,
            options,
        }
    }

    fn milestone_name(&self) -> Option<&str> {
        Some(self.options.milestone.as_str()).filter(|m| !m.is_empty())
    }

    /// Run every phase
    pub fn run(&self) -> Result<ImportOutcome, TrackerError> {
        let mut stats = ImportStats::default();

        let milestone = self.ensure_taxonomy(&mut stats)?;
        let creation = self.create_items(milestone, &mut stats)?;

        if self.options.dry_run {
            println!(
                "{} [DRY RUN] Skipping linking and body updates",
                style("○").dim()
            );
        } else {
            self.link_items(&creation, &mut stats)?;
        }

        Ok(ImportOutcome {
            stats,
            remote_ids: creation.remote_ids,
            created: creation.per_row,
        })
    }

    /// Ensure the milestone and labels exist; returns the milestone number
    fn ensure_taxonomy(&self, stats: &mut ImportStats) -> Result<Option<u64>, TrackerError> {
        let wanted = wanted_labels(self.rows);

        if self.options.dry_run {
            if let Some(name) = self.milestone_name() {
                println!(
                    "{} [DRY RUN] would ensure milestone '{}'",
                    style("○").dim(),
                    name
                );
            }
            println!(
                "{} [DRY RUN] would ensure labels: {:?}",
                style("○").dim(),
                wanted.iter().collect::<Vec<_>>()
            );
            return Ok(None);
        }

        let number = match self.milestone_name() {
            Some(name) => {
                let number = ensure_milestone(self.tracker, name)?;
                println!(
                    "{} Using milestone '{}' (number {})",
                    style("✓").green(),
                    name,
                    number
                );
                Some(number)
            }
            None => None,
        };

        let report = ensure_labels(self.tracker, &wanted, &self.options.label_color)?;
        if !self.options.quiet {
            for name in &report.created {
                println!("{} Created label '{}'", style("✓").green(), name);
            }
        }
        for (name, err) in &report.failed {
            eprintln!(
                "{} WARNING: could not create label '{}': {}",
                style("!").yellow(),
                name,
                err
            );
        }

        stats.labels_created = report.created.len();
        stats.label_failures = report.failed.len();

        Ok(number)
    }

    /// First pass: one issue per row, recording remote ids
    fn create_items(
        &self,
        milestone: Option<u64>,
        stats: &mut ImportStats,
    ) -> Result<Creation, TrackerError> {
        let mut creation = Creation::default();
        let mut placeholders = HashSet::new();
        let assignees: Vec<String> = self.options.assignee.iter().cloned().collect();

        for (index, row) in self.rows.iter().enumerate() {
            stats.rows_processed += 1;
            creation.graph.record(index, row);

            let title = row.display_title();
            let labels = compose_labels(row);

            let remote = if self.options.dry_run {
                let placeholder = dry_run_placeholder(row, index, &mut placeholders);
                if !self.options.quiet {
                    println!(
                        "{} [DRY RUN] Would create issue: {} | labels={:?} ({})",
                        style("○").dim(),
                        title,
                        labels,
                        style(&placeholder).cyan()
                    );
                }
                RemoteId::DryRun(placeholder)
            } else {
                let issue = self.tracker.create_issue(&NewIssue {
                    title: title.to_string(),
                    body: compose_body(row, self.milestone_name()),
                    labels,
                    milestone,
                    assignees: assignees.clone(),
                })?;
                stats.items_created += 1;
                if !self.options.quiet {
                    println!(
                        "{} Created {}: {}",
                        style("✓").green(),
                        style(format!("#{}", issue.number)).cyan(),
                        title
                    );
                }
                RemoteId::Issue(issue.number)
            };

            creation.remote_ids.insert(&row.id, remote.clone());
            creation.per_row.push(remote);
        }

        Ok(creation)
    }

    /// Second pass: dependency/parent annotations, then parent subtask lists
    fn link_items(&self, creation: &Creation, stats: &mut ImportStats) -> Result<(), TrackerError> {
        for (row, remote) in self.rows.iter().zip(&creation.per_row) {
            let Some(number) = remote.number() else {
                continue;
            };

            if let Some(extra) = link_annotation(row, &creation.remote_ids) {
                self.append_to_body(number, &extra)?;
                stats.items_linked += 1;
                if !self.options.quiet {
                    println!(
                        "{} Linked {}",
                        style("✓").green(),
                        style(format!("#{}", number)).cyan()
                    );
                }
            }
        }

        for (parent, children) in creation.graph.parents() {
            let Some(number) = creation.remote_ids.number(parent) else {
                continue;
            };

            if let Some(block) = subtasks_block(children, self.rows, &creation.per_row) {
                self.append_to_body(number, &block)?;
                stats.parents_annotated += 1;
                if !self.options.quiet {
                    println!(
                        "{} Listed {} subtask(s) on {}",
                        style("✓").green(),
                        children.len(),
                        style(format!("#{}", number)).cyan()
                    );
                }
            }
        }

        Ok(())
    }

    /// Read the current body, append, write it back (last write wins)
    fn append_to_body(&self, number: u64, extra: &str) -> Result<(), TrackerError> {
        let current = self.tracker.get_issue(number)?.body.unwrap_or_default();
        self.tracker
            .update_issue_body(number, &format!("{}{}", current, extra))?;
        Ok(())
    }
}

/// `DRY-<local id>`, made unique per row
fn dry_run_placeholder(row: &Row, index: usize, used: &mut HashSet<String>) -> String {
    let base = if row.id.is_empty() {
        format!("DRY-row{}", index + 1)
    } else {
        format!("DRY-{}", row.id)
    };

    let mut name = base.clone();
    let mut suffix = index + 1;
    while used.contains(&name) {
        name = format!("{}-{}", base, suffix);
        suffix += 1;
    }

    used.insert(name.clone());
    name
}
