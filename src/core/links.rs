//! Cross-reference resolution between rows
//!
//! Rows refer to each other by local id before any issue exists. Creation
//! fills a [`RemoteIds`] map; linking reads it once it is complete.

use std::collections::HashMap;
use std::fmt;

use crate::core::row::Row;

/// Identity assigned to a row by the creation pass
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RemoteId {
    /// Issue number on the tracker
    Issue(u64),
    /// Placeholder recorded in dry-run mode
    DryRun(String),
}

impl RemoteId {
    /// Issue number, if this is a real issue
    pub fn number(&self) -> Option<u64> {
        match self {
            RemoteId::Issue(n) => Some(*n),
            RemoteId::DryRun(_) => None,
        }
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Issue(n) => write!(f, "#{}", n),
            RemoteId::DryRun(placeholder) => write!(f, "{}", placeholder),
        }
    }
}

/// Local id to remote id mapping
#[derive(Debug, Default)]
pub struct RemoteIds {
    entries: HashMap<String, RemoteId>,
}

impl RemoteIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the remote id for a local id; a repeated local id keeps the latest
    pub fn insert(&mut self, local_id: &str, remote: RemoteId) {
        self.entries.insert(local_id.to_string(), remote);
    }

    pub fn get(&self, local_id: &str) -> Option<&RemoteId> {
        self.entries.get(local_id)
    }

    /// Issue number for a local id, if it was created in this run
    pub fn number(&self, local_id: &str) -> Option<u64> {
        self.get(local_id).and_then(RemoteId::number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parent/child adjacency derived from the rows
///
/// Children are kept as row positions, so rows sharing a local id (or
/// having none) stay distinct. Dependencies are not stored here; each row
/// carries its own list.
#[derive(Debug, Default)]
pub struct LinkGraph {
    /// Parent ids in order of first mention
    parents: Vec<String>,
    children: HashMap<String, Vec<usize>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a whole row set
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut graph = Self::new();
        for (index, row) in rows.iter().enumerate() {
            graph.record(index, row);
        }
        graph
    }

    /// Add the parent link of the row at `index`
    pub fn record(&mut self, index: usize, row: &Row) {
        if let Some(parent) = row.parent() {
            if !self.children.contains_key(parent) {
                self.parents.push(parent.to_string());
            }
            self.children
                .entry(parent.to_string())
                .or_default()
                .push(index);
        }
    }

    /// Row positions of a parent's children, in file order
    pub fn children_of(&self, parent_id: &str) -> &[usize] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parents with their children, in order of first mention
    pub fn parents(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.parents
            .iter()
            .map(|p| (p.as_str(), self.children_of(p)))
    }
}
