//! Tabular Reader
//!
//! Windowed access to CSV files on disk. Every call scans from the start of
//! the file; skipped rows are parsed into a single reused record buffer so
//! memory stays proportional to the rows actually returned.
//!
//! Row shape policy: rows shorter than the header are padded with empty
//! fields, rows longer than the header are rejected as malformed. Files
//! read without a header are returned as parsed.

use crate::error::{ApiError, StorageError};
use csv::{Reader, ReaderBuilder, StringRecord};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Upper bound on the up-front allocation for a window's rows.
const ROW_PREALLOC_CAP: usize = 1024;

/// Header plus a contiguous slice of data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableWindow {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read up to `max_rows` data rows after discarding `skip_data_rows`.
///
/// The header (when `has_header` is set) is always parsed first and is not
/// counted as a data row. Skipped rows are held to the same width rule as
/// returned ones. Asking for rows past the end of the file yields a
/// short or empty window, never an error.
pub fn read_window(
    path: &Path,
    has_header: bool,
    skip_data_rows: u64,
    max_rows: usize,
) -> Result<TableWindow, ApiError> {
    let mut reader = open(path, has_header)?;
    let header = if has_header {
        record_to_vec(reader.headers().map_err(|e| csv_error(path, e))?)
    } else {
        Vec::new()
    };

    let mut record = StringRecord::new();
    let mut skipped = 0u64;
    while skipped < skip_data_rows {
        if !reader
            .read_record(&mut record)
            .map_err(|e| csv_error(path, e))?
        {
            return Ok(TableWindow {
                header,
                rows: Vec::new(),
            });
        }
        check_width(path, &record, header.len())?;
        skipped += 1;
    }

    let mut rows = Vec::with_capacity(max_rows.min(ROW_PREALLOC_CAP));
    while rows.len() < max_rows {
        if !reader
            .read_record(&mut record)
            .map_err(|e| csv_error(path, e))?
        {
            break;
        }
        check_width(path, &record, header.len())?;
        let mut row = record_to_vec(&record);
        if row.len() < header.len() {
            row.resize(header.len(), String::new());
        }
        rows.push(row);
    }

    Ok(TableWindow { header, rows })
}

/// Column names of the file, without touching any data rows.
pub fn read_header(path: &Path) -> Result<Vec<String>, ApiError> {
    Ok(read_window(path, true, 0, 0)?.header)
}

/// Count data rows (records after the header) with a full scan.
///
/// Applies the same row shape policy as [`read_window`], so a file that
/// counts cleanly can be paged end to end.
pub fn count_data_rows(path: &Path) -> Result<u64, ApiError> {
    let mut reader = open(path, true)?;
    let width = reader.headers().map_err(|e| csv_error(path, e))?.len();

    let mut record = StringRecord::new();
    let mut rows = 0u64;
    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(path, e))?
    {
        check_width(path, &record, width)?;
        rows += 1;
    }
    Ok(rows)
}

fn open(path: &Path, has_header: bool) -> Result<Reader<File>, ApiError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            ApiError::NotFound(format!("file {} does not exist", path.display()))
        }
        _ => ApiError::StorageError(StorageError::IoError(e)),
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(file))
}

fn check_width(path: &Path, record: &StringRecord, width: usize) -> Result<(), ApiError> {
    if width > 0 && record.len() > width {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        return Err(ApiError::MalformedData(format!(
            "{} line {}: expected at most {} fields, found {}",
            path.display(),
            line,
            width,
            record.len()
        )));
    }
    Ok(())
}

fn record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn csv_error(path: &Path, err: csv::Error) -> ApiError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => ApiError::StorageError(StorageError::IoError(io)),
        _ => ApiError::MalformedData(format!("{}: {}", path.display(), message)),
    }
}
