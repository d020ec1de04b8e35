// src/table.rs
// =============================================================================
// The tabular edge of the tool: CSV in, CSV/JSON out.
//
// Column names are a contract with whatever produces and consumes these
// files:
// - validation reads a `Website` column and writes a `URL` column
// - crawling reads a `URL` column (the validator's output) and writes
//   `URL` + `Content`
// - the link graph is written as a JSON object: parent -> [children]
//
// A missing column is an error, never an empty result.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::crawl::{Adjacency, PageRecord};

/// Column holding candidate websites in validation input
pub const WEBSITE_COLUMN: &str = "Website";

/// Column holding URLs in validation output and crawl input/output
pub const URL_COLUMN: &str = "URL";

// Reads every non-blank cell of `column`, in row order
//
// Errors when the file can't be read or has no such column.
pub fn read_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input table {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .clone();

    let index = headers.iter().position(|h| h.trim() == column).ok_or_else(|| {
        let found: Vec<&str> = headers.iter().collect();
        anyhow!(
            "Input table {} must contain a column named '{}' (found: {})",
            path.display(),
            column,
            if found.is_empty() { "no columns".to_string() } else { found.join(", ") }
        )
    })?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // Row numbers as a spreadsheet shows them: header is row 1
        let record = record.with_context(|| format!("Failed to read row {} of {}", row + 2, path.display()))?;

        match record.get(index).map(str::trim) {
            Some(value) if !value.is_empty() => values.push(value.to_string()),
            _ => tracing::debug!(row = row + 2, column, "blank cell skipped"),
        }
    }

    Ok(values)
}

#[derive(Serialize)]
struct UrlRow<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
}

/// Writes a one-column `URL` table
pub fn write_urls(path: &Path, urls: &[String]) -> Result<()> {
    let mut writer = create_writer(path)?;
    // Header goes out even when there are no rows
    writer.write_record([URL_COLUMN])?;
    for url in urls {
        writer.serialize(UrlRow { url })?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Writes the `URL,Content` table of crawled pages
pub fn write_pages(path: &Path, pages: &[PageRecord]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record([URL_COLUMN, "Content"])?;
    for page in pages {
        writer.serialize(page)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Writes the link graph as pretty-printed JSON
pub fn write_graph(path: &Path, adjacency: &Adjacency) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, adjacency)
        .with_context(|| format!("Failed to write link graph to {}", path.display()))
}

// Headers are written by hand so an empty table still has them
fn create_writer(path: &Path) -> Result<csv::Writer<File>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))
}
