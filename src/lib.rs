//! issue-import: bulk-create GitHub issues from a CSV file
//!
//! Rows are created as issues in file order, then a second pass links them:
//! dependency checklists, parent references and subtask lists on parents.

pub mod cli;
pub mod core;
