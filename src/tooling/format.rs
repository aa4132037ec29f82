//! Format catalog results as human-readable text.

use crate::types::{Dataset, DatasetSchema, DatasetSummary, PageView};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn rows_table(columns: &[String], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !columns.is_empty() {
        table.set_header(columns.to_vec());
    }
    for row in rows {
        table.add_row(row.clone());
    }
    table
}

pub fn format_dataset_text(data: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Uploaded {}", data.filename))
    ));
    out.push_str(&format!("  Size: {} bytes\n", data.size));
    out.push_str(&format!("  Rows: {}\n", data.total_rows));
    out.push_str(&format!(
        "  Pages: {} (page size {})\n",
        data.total_pages, data.page_size
    ));
    out.push_str(&format!("  Columns: {}\n\n", data.columns.join(", ")));
    if !data.preview.is_empty() {
        out.push_str(&format!("{}\n", rows_table(&data.columns, &data.preview)));
    }
    out
}

pub fn format_page_text(page: &PageView) -> String {
    let mut out = String::new();
    let position = match page.total_pages {
        Some(total) => format!("page {} of {}", page.current_page, total),
        None => format!("page {}", page.current_page),
    };
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("{} ({})", page.filename, position))
    ));
    if page.rows.is_empty() {
        out.push_str("No rows on this page.\n");
        return out;
    }
    out.push_str(&format!("{}\n\n", rows_table(&page.columns, &page.rows)));
    out.push_str(&format!(
        "Showing {} rows, {} total.\n",
        page.rows.len(),
        page.total_rows
    ));
    out
}

pub fn format_schema_text(schema: &DatasetSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&schema.filename)
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Column"]);
    for (i, column) in schema.columns.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), column.clone()]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Rows: {}\n", schema.total_rows));
    out
}

pub fn format_list_text(entries: &[DatasetSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Datasets")));
    if entries.is_empty() {
        out.push_str("No datasets uploaded.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Uploaded", "Size", "Rows"]);
    for row in entries {
        table.add_row(vec![
            row.name.clone(),
            row.uploaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            row.size.to_string(),
            row.rows.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} datasets.\n", entries.len()));
    out
}
