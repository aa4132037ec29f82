use std::path::PathBuf;
use std::sync::Arc;

use tabpage::config::ResolvedPaths;
use tabpage::storage::LocalByteStore;
use tabpage::store::JsonMetadataStore;
use tabpage::{Catalog, CatalogSettings};
use tempfile::TempDir;

pub struct TestCatalog {
    pub catalog: Catalog,
    pub uploads_dir: PathBuf,
    pub metadata_file: PathBuf,
    // Keeps the directory alive for the test's duration
    _dir: TempDir,
}

pub fn test_catalog() -> TestCatalog {
    test_catalog_with(CatalogSettings::default())
}

pub fn test_catalog_with(settings: CatalogSettings) -> TestCatalog {
    let dir = TempDir::new().unwrap();
    let paths = ResolvedPaths {
        data_dir: dir.path().to_path_buf(),
        uploads_dir: dir.path().join("uploads"),
        metadata_file: dir.path().join("metadata.json"),
    };
    TestCatalog {
        catalog: Catalog::open(&paths, settings),
        uploads_dir: paths.uploads_dir,
        metadata_file: paths.metadata_file,
        _dir: dir,
    }
}

/// Fresh catalog over the same directories, as a restarted process would see.
pub fn reopen(test: &TestCatalog) -> Catalog {
    Catalog::new(
        Arc::new(LocalByteStore::new(&test.uploads_dir)),
        Arc::new(JsonMetadataStore::new(&test.metadata_file)),
        CatalogSettings::default(),
    )
}

/// CSV with an `id,label` header and `rows` data rows.
pub fn numbered_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,label\n");
    for i in 1..=rows {
        out.push_str(&format!("{},item {}\n", i, i));
    }
    out.into_bytes()
}
