//! Milestone and label provisioning

use std::collections::{BTreeSet, HashSet};

use crate::core::row::Row;
use crate::core::tracker::{collect_pages, IssueTracker, TrackerError};

/// Every label the rows will attach: types, priorities and Labels entries
pub fn wanted_labels(rows: &[Row]) -> BTreeSet<String> {
    let mut wanted = BTreeSet::new();
    for row in rows {
        wanted.extend(row.extra_labels());
        if !row.kind.is_empty() {
            wanted.insert(row.kind.clone());
        }
        if !row.priority.is_empty() {
            wanted.insert(row.priority.clone());
        }
    }
    wanted
}

/// Find a milestone by title, creating it if missing; returns its number
pub fn ensure_milestone<T: IssueTracker + ?Sized>(
    tracker: &T,
    title: &str,
) -> Result<u64, TrackerError> {
    let milestones = collect_pages(|page| tracker.list_milestones(page))?;
    if let Some(existing) = milestones.iter().find(|m| m.title == title) {
        return Ok(existing.number);
    }

    Ok(tracker.create_milestone(title)?.number)
}

/// Outcome of [`ensure_labels`]
#[derive(Debug, Default)]
pub struct LabelReport {
    pub existing: usize,
    pub created: Vec<String>,
    /// Labels that could not be created; these never abort the run
    pub failed: Vec<(String, TrackerError)>,
}

/// Create each wanted label that the repository does not have yet
///
/// Listing failures are fatal; creation failures are collected in the report.
pub fn ensure_labels<T: IssueTracker + ?Sized>(
    tracker: &T,
    wanted: &BTreeSet<String>,
    color: &str,
) -> Result<LabelReport, TrackerError> {
    let existing: HashSet<String> = collect_pages(|page| tracker.list_labels(page))?
        .into_iter()
        .map(|l| l.name)
        .collect();

    let mut report = LabelReport {
        existing: existing.len(),
        ..LabelReport::default()
    };

    for name in wanted.iter().filter(|w| !w.is_empty() && !existing.contains(*w)) {
        match tracker.create_label(name, color) {
            Ok(_) => report.created.push(name.clone()),
            Err(e) => report.failed.push((name.clone(), e)),
        }
    }

    Ok(report)
}
