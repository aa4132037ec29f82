use proptest::prelude::*;
use proptest::test_runner::Config;

use crate::integration::support::test_catalog;

fn csv_from(rows: &[(u32, String)]) -> Vec<u8> {
    let mut out = String::from("n,text\n");
    for (n, text) in rows {
        out.push_str(&format!("{},\"{}\"\n", n, text.replace('"', "\"\"")));
    }
    out.into_bytes()
}

proptest! {
    #![proptest_config(Config::with_cases(48))]
    #[test]
    fn concatenated_pages_reproduce_every_row(
        rows in prop::collection::vec((any::<u32>(), "[a-z ,\"]{0,12}"), 0..60),
        page_size in 1_u64..15,
    ) {
        let test = test_catalog();
        let dataset = test.catalog.register("rt.csv", &csv_from(&rows)).unwrap();
        prop_assert_eq!(dataset.total_rows, rows.len() as u64);

        let total_pages = test.catalog.get_page("rt.csv", 1, page_size).unwrap().total_pages.unwrap();
        let mut collected = Vec::new();
        for page in 1..=total_pages {
            let view = test.catalog.get_page("rt.csv", page as i64, page_size).unwrap();
            prop_assert!(!view.rows.is_empty());
            prop_assert!(view.rows.len() as u64 <= page_size);
            collected.extend(view.rows);
        }

        let expected: Vec<Vec<String>> = rows
            .iter()
            .map(|(n, text)| vec![n.to_string(), text.clone()])
            .collect();
        prop_assert_eq!(collected, expected);

        let past_end = test.catalog.get_page("rt.csv", total_pages as i64 + 1, page_size).unwrap();
        prop_assert!(past_end.rows.is_empty());
    }
}
