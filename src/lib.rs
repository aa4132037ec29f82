//! Tabpage: Paginated Access to Uploaded Tabular Files
//!
//! Uploads are validated, stored, and indexed with durable per-file
//! metadata (upload time, size, row count). Pages of rows are served by
//! re-scanning the stored file with memory bounded by the page size.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod pager;
pub mod reader;
pub mod storage;
pub mod store;
pub mod tooling;
pub mod types;
pub mod validation;

pub use catalog::{Catalog, CatalogSettings};
pub use error::{ApiError, StorageError, ValidationFailure};
