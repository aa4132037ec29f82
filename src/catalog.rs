//! Dataset Catalog
//!
//! Registration, listing, paging and deletion of uploaded tabular files.
//! The catalog owns no cached state: every operation reloads the metadata
//! snapshot and consults the byte store, so independent calls never see
//! each other's in-memory leftovers.

use crate::config::{ResolvedPaths, TabpageConfig};
use crate::error::{ApiError, ValidationFailure};
use crate::pager;
use crate::reader;
use crate::storage::{ByteStore, LocalByteStore};
use crate::store::{JsonMetadataStore, MetadataEntry, MetadataStore};
use crate::types::{Dataset, DatasetSchema, DatasetSummary, PageView, RowCount};
use crate::validation::{
    check_extension, ContentValidator, CsvContentSniffer, FilenameSanitizer, SecureFilename,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Limits and paging defaults the catalog enforces.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub max_upload_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub sniff_bytes: usize,
    pub default_page_size: u64,
    pub preview_rows: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings::from(&TabpageConfig::default())
    }
}

impl From<&TabpageConfig> for CatalogSettings {
    fn from(config: &TabpageConfig) -> Self {
        Self {
            max_upload_bytes: config.limits.max_upload_bytes,
            allowed_extensions: config.limits.allowed_extensions.clone(),
            sniff_bytes: config.limits.sniff_bytes,
            default_page_size: config.paging.default_page_size,
            preview_rows: config.paging.preview_rows,
        }
    }
}

pub struct Catalog {
    bytes: Arc<dyn ByteStore>,
    metadata: Arc<dyn MetadataStore>,
    validator: Arc<dyn ContentValidator>,
    sanitizer: Arc<dyn FilenameSanitizer>,
    settings: CatalogSettings,
}

impl Catalog {
    /// Catalog over the given stores with the default CSV sniffer and sanitizer.
    pub fn new(
        bytes: Arc<dyn ByteStore>,
        metadata: Arc<dyn MetadataStore>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            bytes,
            metadata,
            validator: Arc::new(CsvContentSniffer),
            sanitizer: Arc::new(SecureFilename),
            settings,
        }
    }

    /// Local filesystem catalog at the resolved storage paths.
    pub fn open(paths: &ResolvedPaths, settings: CatalogSettings) -> Self {
        Self::new(
            Arc::new(LocalByteStore::new(&paths.uploads_dir)),
            Arc::new(JsonMetadataStore::new(&paths.metadata_file)),
            settings,
        )
    }

    pub fn with_validator(mut self, validator: Arc<dyn ContentValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn FilenameSanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Validate, persist and index an upload.
    ///
    /// Re-registering a name replaces both the stored bytes and the metadata
    /// entry. Nothing is written when validation or the size check fails. The
    /// earlier entry is dropped before the new bytes land. If the persisted
    /// file turns out not to parse, the bytes are removed as well.
    pub fn register(&self, filename: &str, bytes: &[u8]) -> Result<Dataset, ApiError> {
        let name = self.sanitizer.sanitize(filename);
        if name.is_empty() {
            return Err(ValidationFailure::MissingFilename.into());
        }
        check_extension(&name, &self.settings.allowed_extensions)?;

        let sample = &bytes[..bytes.len().min(self.settings.sniff_bytes)];
        if !self.validator.is_acceptable(sample) {
            return Err(ValidationFailure::UnsupportedContent.into());
        }

        let size = bytes.len() as u64;
        if size > self.settings.max_upload_bytes {
            return Err(ApiError::TooLarge {
                size,
                limit: self.settings.max_upload_bytes,
            });
        }

        // Any failure past this point leaves an unindexed file, never an
        // entry describing other bytes.
        self.metadata.remove(&name)?;
        self.bytes.write(&name, bytes)?;

        let path = self.bytes.resolve(&name);
        let scanned = reader::read_window(&path, true, 0, self.settings.preview_rows)
            .and_then(|window| Ok((window, reader::count_data_rows(&path)?)));
        let (window, total_rows) = match scanned {
            Ok(scanned) => scanned,
            Err(e @ ApiError::MalformedData(_)) => {
                self.discard(&name);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let entry = MetadataEntry {
            uploaded_at: Utc::now(),
            size,
            rows: total_rows,
        };
        self.metadata.upsert(&name, entry.clone())?;

        let page_size = self.settings.default_page_size;
        let total_pages = pager::total_pages(total_rows, page_size)?;
        info!(dataset = %name, rows = total_rows, size, "dataset registered");

        Ok(Dataset {
            filename: name,
            columns: window.header,
            total_rows,
            size,
            uploaded_at: entry.uploaded_at,
            page_size,
            total_pages,
            preview: window.rows,
        })
    }

    /// Every stored file, newest first.
    ///
    /// Files without a metadata entry are reported with their filesystem
    /// modification time and an unknown row count; rows are never counted
    /// here.
    pub fn list(&self) -> Result<Vec<DatasetSummary>, ApiError> {
        let entries = self.metadata.load();
        let names = self.bytes.list()?;

        let mut summaries = Vec::with_capacity(names.len());
        for name in &names {
            let summary = match entries.get(name) {
                Some(entry) => DatasetSummary {
                    name: name.clone(),
                    uploaded_at: entry.uploaded_at,
                    size: entry.size,
                    rows: RowCount::Known(entry.rows),
                },
                None => match self.bytes.stat(name) {
                    Ok(stat) => DatasetSummary {
                        name: name.clone(),
                        uploaded_at: stat.modified,
                        size: stat.size,
                        rows: RowCount::Unknown,
                    },
                    Err(e) => {
                        warn!("Skipping {} in listing: {}", name, e);
                        continue;
                    }
                },
            };
            summaries.push(summary);
        }

        let present: HashSet<&String> = names.iter().collect();
        for stale in entries.keys().filter(|k| !present.contains(k)) {
            debug!(dataset = %stale, "metadata entry without stored file");
        }

        summaries.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(summaries)
    }

    /// Remove the stored file and its metadata entry.
    ///
    /// Fails with `NotFound` when no file is stored under the name; a
    /// missing metadata entry is not an error.
    pub fn delete(&self, filename: &str) -> Result<(), ApiError> {
        let name = self.stored_name(filename)?;
        self.bytes.delete(&name)?;
        let had_metadata = self.metadata.remove(&name)?;
        info!(dataset = %name, had_metadata, "dataset deleted");
        Ok(())
    }

    /// Fetch one page of rows (1-based).
    ///
    /// Pages past the end are empty. Files without metadata are still paged,
    /// but their total row and page counts are reported as unknown.
    pub fn get_page(
        &self,
        filename: &str,
        page_number: i64,
        page_size: u64,
    ) -> Result<PageView, ApiError> {
        let name = self.stored_name(filename)?;

        let total_rows = RowCount::from(self.metadata.load().get(&name).map(|e| e.rows));
        let (skip, take, total_pages) = match total_rows {
            RowCount::Known(rows) => {
                let window = pager::page_window(page_number, page_size, rows)?;
                (window.skip, window.take, Some(window.total_pages))
            }
            RowCount::Unknown => {
                let (skip, take) = pager::skip_take(page_number, page_size)?;
                (skip, take, None)
            }
        };

        let max_rows = usize::try_from(take).map_err(|_| {
            ApiError::InvalidArgument(format!("page size {} is too large", page_size))
        })?;
        debug!(dataset = %name, skip, take, "reading page window");
        let window = reader::read_window(&self.bytes.resolve(&name), true, skip, max_rows)?;

        Ok(PageView {
            filename: name,
            columns: window.header,
            rows: window.rows,
            current_page: page_number as u64,
            page_size,
            total_rows,
            total_pages,
        })
    }

    /// Column names and recorded row count, without reading data rows.
    pub fn schema(&self, filename: &str) -> Result<DatasetSchema, ApiError> {
        let name = self.stored_name(filename)?;
        let columns = reader::read_header(&self.bytes.resolve(&name))?;
        let total_rows = RowCount::from(self.metadata.load().get(&name).map(|e| e.rows));
        Ok(DatasetSchema {
            filename: name,
            columns,
            total_rows,
        })
    }

    /// Raw bytes of a stored file.
    pub fn download(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let name = self.stored_name(filename)?;
        Ok(self.bytes.read(&name)?)
    }

    /// Name a file is stored under.
    ///
    /// A name exactly as `list` reports it is used verbatim, so files placed
    /// in storage outside of `register` stay reachable. Anything else goes
    /// through the sanitizer, matching how uploads are named.
    fn stored_name(&self, filename: &str) -> Result<String, ApiError> {
        if is_plain_name(filename) && self.bytes.exists(filename) {
            return Ok(filename.to_string());
        }
        let name = self.sanitizer.sanitize(filename);
        if name.is_empty() || !self.bytes.exists(&name) {
            return Err(ApiError::NotFound(format!(
                "dataset '{}' does not exist",
                filename
            )));
        }
        Ok(name)
    }

    fn discard(&self, name: &str) {
        if let Err(e) = self.bytes.delete(name) {
            warn!("Failed to remove rejected upload {}: {}", name, e);
        }
        if let Err(e) = self.metadata.remove(name) {
            warn!("Failed to drop metadata for rejected upload {}: {}", name, e);
        }
    }
}

/// A single visible path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
