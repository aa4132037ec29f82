//! Views returned by catalog operations.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Row count of a dataset; unknown for files that were never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCount {
    Known(u64),
    Unknown,
}

impl RowCount {
    pub fn known(self) -> Option<u64> {
        match self {
            RowCount::Known(rows) => Some(rows),
            RowCount::Unknown => None,
        }
    }
}

impl From<Option<u64>> for RowCount {
    fn from(rows: Option<u64>) -> Self {
        rows.map(RowCount::Known).unwrap_or(RowCount::Unknown)
    }
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowCount::Known(rows) => write!(f, "{}", rows),
            RowCount::Unknown => f.write_str("unknown"),
        }
    }
}

// Known counts serialize as numbers, unknown as the string "unknown".
impl Serialize for RowCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowCount::Known(rows) => serializer.serialize_u64(*rows),
            RowCount::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// A freshly registered dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub filename: String,
    pub columns: Vec<String>,
    pub total_rows: u64,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub page_size: u64,
    pub total_pages: u64,
    /// First rows of the file, already shaped to the header
    pub preview: Vec<Vec<String>>,
}

/// One line of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub size: u64,
    pub rows: RowCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSchema {
    pub filename: String,
    pub columns: Vec<String>,
    pub total_rows: RowCount,
}

/// One page of rows plus the context needed to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub filename: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_rows: RowCount,
    /// None when the row count is unknown
    pub total_pages: Option<u64>,
}
