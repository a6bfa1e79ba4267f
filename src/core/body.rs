//! Issue body and label composition

use crate::core::links::{RemoteId, RemoteIds};
use crate::core::row::Row;

/// Body for a new issue: metadata header, blank line, description
pub fn compose_body(row: &Row, milestone: Option<&str>) -> String {
    let mut header = Vec::new();
    if !row.kind.is_empty() {
        header.push(format!("**Type:** {}", row.kind));
    }
    if !row.priority.is_empty() {
        header.push(format!("**Priority:** {}", row.priority));
    }
    if !row.estimate.is_empty() {
        header.push(format!("**Estimate:** {} pts", row.estimate));
    }
    if let Some(milestone) = milestone.filter(|m| !m.is_empty()) {
        header.push(format!("**Milestone:** {}", milestone));
    }

    if header.is_empty() {
        return row.description.clone();
    }
    format!("{}\n\n{}", header.join("\n"), row.description)
}

/// Labels for a new issue: type, priority, then the Labels column
///
/// Duplicates are kept; the tracker collapses them.
pub fn compose_labels(row: &Row) -> Vec<String> {
    let mut labels = Vec::new();
    if !row.kind.is_empty() {
        labels.push(row.kind.clone());
    }
    if !row.priority.is_empty() {
        labels.push(row.priority.clone());
    }
    labels.extend(row.extra_labels());
    labels
}

/// Text appended to a row's issue for its dependencies and parent
///
/// Only the row's own Dependencies cell is read. Unresolved references are
/// skipped. Returns `None` when nothing resolves.
pub fn link_annotation(row: &Row, ids: &RemoteIds) -> Option<String> {
    let mut extra = String::new();

    let refs: Vec<String> = row
        .dependency_ids()
        .iter()
        .filter_map(|dep| ids.number(dep))
        .map(|n| format!("- [ ] Blocked by #{}", n))
        .collect();
    if !refs.is_empty() {
        extra.push_str("\n\n### Dependencies\n");
        extra.push_str(&refs.join("\n"));
    }

    if let Some(parent) = row.parent().and_then(|p| ids.number(p)) {
        extra.push_str(&format!("\n\n**Parent:** #{}", parent));
    }

    Some(extra).filter(|e| !e.is_empty())
}

/// Checklist appended to a parent issue, one entry per created child
///
/// `children` are row positions; `created` holds each row's remote id in the
/// same order, so number and title always come from the same row.
pub fn subtasks_block(children: &[usize], rows: &[Row], created: &[RemoteId]) -> Option<String> {
    let entries: Vec<String> = children
        .iter()
        .filter_map(|&child| {
            let number = created.get(child)?.number()?;
            let title = rows
                .get(child)
                .map(|r| r.display_title().to_string())
                .unwrap_or_else(|| format!("Issue {}", number));
            Some(format!("- [ ] #{} — {}", number, title))
        })
        .collect();

    if entries.is_empty() {
        return None;
    }
    Some(format!("\n\n### Subtasks\n{}", entries.join("\n")))
}
