use tabpage::types::RowCount;
use tabpage::ApiError;

use crate::integration::support::{numbered_csv, test_catalog};

#[test]
fn corrupt_metadata_degrades_to_filesystem_listing() {
    let test = test_catalog();
    test.catalog.register("a.csv", &numbered_csv(3)).unwrap();
    test.catalog.register("b.csv", &numbered_csv(5)).unwrap();

    std::fs::write(&test.metadata_file, b"{\"a.csv\": {\"uploaded_at\": 17").unwrap();

    let listed = test.catalog.list().unwrap();
    assert_eq!(listed.len(), 2);
    for summary in &listed {
        assert_eq!(summary.rows, RowCount::Unknown);
    }
    let a = listed.iter().find(|s| s.name == "a.csv").unwrap();
    assert_eq!(a.size, numbered_csv(3).len() as u64);
}

#[test]
fn pages_are_still_served_after_corruption() {
    let test = test_catalog();
    test.catalog.register("a.csv", &numbered_csv(15)).unwrap();
    std::fs::write(&test.metadata_file, b"not json at all").unwrap();

    let page = test.catalog.get_page("a.csv", 2, 10).unwrap();
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.total_rows, RowCount::Unknown);
    assert_eq!(page.total_pages, None);
}

#[test]
fn next_registration_rewrites_a_corrupt_store() {
    let test = test_catalog();
    test.catalog.register("a.csv", &numbered_csv(3)).unwrap();
    std::fs::write(&test.metadata_file, b"[]garbage").unwrap();

    test.catalog.register("b.csv", &numbered_csv(4)).unwrap();

    let listed = test.catalog.list().unwrap();
    let b = listed.iter().find(|s| s.name == "b.csv").unwrap();
    let a = listed.iter().find(|s| s.name == "a.csv").unwrap();
    assert_eq!(b.rows, RowCount::Known(4));
    assert_eq!(a.rows, RowCount::Unknown);

    let raw = std::fs::read_to_string(&test.metadata_file).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn unwritable_metadata_keeps_previous_upload_consistent() {
    let test = test_catalog();
    test.catalog.register("d.csv", &numbered_csv(3)).unwrap();
    std::fs::create_dir(test.metadata_file.with_file_name("metadata.json.tmp")).unwrap();

    let err = test.catalog.register("d.csv", &numbered_csv(1)).unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));

    let listed = test.catalog.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].rows, RowCount::Known(3));
    assert_eq!(listed[0].size, numbered_csv(3).len() as u64);

    let page = test.catalog.get_page("d.csv", 3, 1).unwrap();
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.rows, vec![vec!["3", "item 3"]]);
}
