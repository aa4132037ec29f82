use tabpage::store::{JsonMetadataStore, MetadataStore};
use tabpage::types::RowCount;
use tabpage::{ApiError, CatalogSettings, ValidationFailure};

use crate::integration::support::{numbered_csv, reopen, test_catalog, test_catalog_with};

#[test]
fn twenty_five_rows_in_pages_of_ten() {
    let test = test_catalog();
    let dataset = test
        .catalog
        .register("scores.csv", &numbered_csv(25))
        .unwrap();
    assert_eq!(dataset.total_rows, 25);
    assert_eq!(dataset.columns, vec!["id", "label"]);
    assert_eq!(dataset.page_size, 10);
    assert_eq!(dataset.total_pages, 3);

    let page3 = test.catalog.get_page("scores.csv", 3, 10).unwrap();
    assert_eq!(page3.rows.len(), 5);
    assert_eq!(page3.rows[0], vec!["21", "item 21"]);
    assert_eq!(page3.current_page, 3);
    assert_eq!(page3.total_pages, Some(3));

    let page4 = test.catalog.get_page("scores.csv", 4, 10).unwrap();
    assert!(page4.rows.is_empty());
    assert_eq!(page4.columns, vec!["id", "label"]);
}

#[test]
fn page_zero_and_negative_are_invalid() {
    let test = test_catalog();
    test.catalog.register("a.csv", &numbered_csv(3)).unwrap();

    assert!(matches!(
        test.catalog.get_page("a.csv", 0, 10),
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        test.catalog.get_page("a.csv", -1, 10),
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        test.catalog.get_page("a.csv", 1, 0),
        Err(ApiError::InvalidArgument(_))
    ));
}

#[test]
fn page_of_unknown_dataset_is_not_found() {
    let test = test_catalog();
    assert!(matches!(
        test.catalog.get_page("ghost.csv", 1, 10),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn empty_file_registers_with_no_pages() {
    let test = test_catalog();
    let dataset = test.catalog.register("empty.csv", b"").unwrap();
    assert_eq!(dataset.total_rows, 0);
    assert_eq!(dataset.total_pages, 0);
    assert!(dataset.columns.is_empty());

    let page = test.catalog.get_page("empty.csv", 1, 10).unwrap();
    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, Some(0));
}

#[test]
fn binary_content_with_csv_extension_is_rejected() {
    let test = test_catalog();
    let payload = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    let err = test.catalog.register("image.csv", payload).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationFailure::UnsupportedContent)
    ));
    assert!(!test.uploads_dir.join("image.csv").exists());
    assert!(JsonMetadataStore::new(&test.metadata_file).load().is_empty());
}

#[test]
fn wrong_extension_is_distinguished_from_bad_content() {
    let test = test_catalog();

    let err = test.catalog.register("notes.txt", b"a,b\n1,2\n").unwrap_err();
    match err {
        ApiError::Validation(ValidationFailure::UnsupportedExtension { extension, .. }) => {
            assert_eq!(extension, "txt")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!test.uploads_dir.join("notes.txt").exists());
}

#[test]
fn oversized_upload_is_rejected_before_writing() {
    let settings = CatalogSettings {
        max_upload_bytes: 16,
        ..CatalogSettings::default()
    };
    let test = test_catalog_with(settings);

    let err = test
        .catalog
        .register("big.csv", &numbered_csv(10))
        .unwrap_err();
    assert!(matches!(err, ApiError::TooLarge { limit: 16, .. }));
    assert!(!test.uploads_dir.join("big.csv").exists());
    assert!(JsonMetadataStore::new(&test.metadata_file).load().is_empty());
}

#[test]
fn reupload_replaces_bytes_and_metadata() {
    let test = test_catalog();
    test.catalog.register("data.csv", &numbered_csv(25)).unwrap();
    let second = test.catalog.register("data.csv", &numbered_csv(4)).unwrap();
    assert_eq!(second.total_rows, 4);

    let entries = JsonMetadataStore::new(&test.metadata_file).load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["data.csv"].rows, 4);
    assert_eq!(entries["data.csv"].size, numbered_csv(4).len() as u64);

    let page = test.catalog.get_page("data.csv", 1, 10).unwrap();
    assert_eq!(page.rows.len(), 4);
    assert_eq!(page.total_pages, Some(1));
}

#[test]
fn delete_is_strict_on_bytes() {
    let test = test_catalog();
    test.catalog.register("gone.csv", &numbered_csv(2)).unwrap();

    test.catalog.delete("gone.csv").unwrap();
    assert!(!test.uploads_dir.join("gone.csv").exists());
    assert!(JsonMetadataStore::new(&test.metadata_file).load().is_empty());

    assert!(matches!(
        test.catalog.delete("gone.csv"),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        test.catalog.delete("never-existed.csv"),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn delete_succeeds_without_metadata_entry() {
    let test = test_catalog();
    std::fs::create_dir_all(&test.uploads_dir).unwrap();
    std::fs::write(test.uploads_dir.join("legacy.csv"), "a\n1\n").unwrap();

    test.catalog.delete("legacy.csv").unwrap();
    assert!(!test.uploads_dir.join("legacy.csv").exists());
}

#[test]
fn list_is_newest_first_and_marks_legacy_files() {
    let test = test_catalog();
    test.catalog.register("first.csv", &numbered_csv(1)).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    test.catalog.register("second.csv", &numbered_csv(2)).unwrap();
    let legacy_bytes = "x\n1\n2\n";
    std::fs::write(test.uploads_dir.join("legacy.csv"), legacy_bytes).unwrap();

    let listed = test.catalog.list().unwrap();
    assert_eq!(listed.len(), 3);

    let registered: Vec<&str> = listed
        .iter()
        .filter(|s| s.rows != RowCount::Unknown)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(registered, vec!["second.csv", "first.csv"]);

    let legacy = listed.iter().find(|s| s.name == "legacy.csv").unwrap();
    assert_eq!(legacy.rows, RowCount::Unknown);
    assert_eq!(legacy.size, legacy_bytes.len() as u64);

    for pair in listed.windows(2) {
        assert!(pair[0].uploaded_at >= pair[1].uploaded_at);
    }
}

#[test]
fn list_skips_metadata_without_bytes() {
    let test = test_catalog();
    test.catalog.register("kept.csv", &numbered_csv(1)).unwrap();
    test.catalog.register("lost.csv", &numbered_csv(1)).unwrap();
    std::fs::remove_file(test.uploads_dir.join("lost.csv")).unwrap();

    let names: Vec<String> = test
        .catalog
        .list()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["kept.csv"]);
}

#[test]
fn metadata_survives_restart() {
    let test = test_catalog();
    let original = test.catalog.register("keep.csv", &numbered_csv(12)).unwrap();

    let restarted = reopen(&test);
    let listed = restarted.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].rows, RowCount::Known(12));
    assert_eq!(listed[0].uploaded_at, original.uploaded_at);

    let page = restarted.get_page("keep.csv", 2, 10).unwrap();
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.total_pages, Some(2));
}

#[test]
fn listed_legacy_file_can_be_paged_and_deleted() {
    let test = test_catalog();
    std::fs::create_dir_all(&test.uploads_dir).unwrap();
    std::fs::write(test.uploads_dir.join("my data.csv"), "a,b\n1,2\n3,4\n").unwrap();

    let listed = test.catalog.list().unwrap();
    assert_eq!(listed.len(), 1);
    let name = listed[0].name.clone();
    assert_eq!(name, "my data.csv");

    let page = test.catalog.get_page(&name, 1, 10).unwrap();
    assert_eq!(page.filename, name);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.total_rows, RowCount::Unknown);

    test.catalog.delete(&name).unwrap();
    assert!(!test.uploads_dir.join("my data.csv").exists());
    assert!(test.catalog.list().unwrap().is_empty());
}
