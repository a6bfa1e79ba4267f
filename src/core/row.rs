//! CSV row loading
//!
//! Every recognized column is optional; absent columns and short rows read as
//! empty strings. Header names are matched case-insensitively.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized columns, in template order
pub const COLUMNS: [&str; 9] = [
    "ID",
    "Title",
    "Type",
    "Priority",
    "Estimate",
    "ParentID",
    "Description",
    "Dependencies",
    "Labels",
];

/// Title used for rows whose Title cell is blank
pub const UNTITLED: &str = "(no title)";

#[derive(Debug, Error)]
pub enum RowError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// One input record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub priority: String,
    pub estimate: String,
    pub parent_id: String,
    pub description: String,
    pub dependencies: String,
    pub labels: String,
}

impl Row {
    /// Title sent to the tracker
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Parent local id, if one is declared
    pub fn parent(&self) -> Option<&str> {
        Some(self.parent_id.as_str()).filter(|p| !p.is_empty())
    }

    /// Local ids this row depends on, split on `,` or `;`, in written order
    pub fn dependency_ids(&self) -> Vec<String> {
        self.dependencies
            .split([',', ';'])
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Entries of the Labels column
    pub fn extra_labels(&self) -> Vec<String> {
        self.labels
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Build a map from header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

/// Get a field value from a CSV record, empty when absent
fn get_field(record: &StringRecord, header_map: &HashMap<String, usize>, field: &str) -> String {
    header_map
        .get(&field.to_lowercase())
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Load rows from a CSV file, preserving file order
pub fn load_rows(path: &Path) -> Result<Vec<Row>, RowError> {
    let file = File::open(path).map_err(|source| RowError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(BufReader::new(file))
}

/// Read rows from any CSV source with a header line
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>, RowError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| RowError::Csv { line: 1, source })?
        .clone();
    let header_map = build_header_map(&headers);

    let mut rows = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|source| RowError::Csv {
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(row_idx as u64 + 2),
            source,
        })?;

        rows.push(Row {
            id: get_field(&record, &header_map, "ID"),
            title: get_field(&record, &header_map, "Title"),
            kind: get_field(&record, &header_map, "Type"),
            priority: get_field(&record, &header_map, "Priority"),
            estimate: get_field(&record, &header_map, "Estimate"),
            parent_id: get_field(&record, &header_map, "ParentID"),
            description: get_field(&record, &header_map, "Description"),
            dependencies: get_field(&record, &header_map, "Dependencies"),
            labels: get_field(&record, &header_map, "Labels"),
        });
    }

    Ok(rows)
}
