//! CSV assembly and file output.
//!
//! Every data cell is double-quoted with internal quotes doubled, so any
//! standard reader configured for RFC-4180 quoting round-trips the values.
//! Header cells are written bare, matching the established file format.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::extract::TrendingRow;

/// Quote one field for CSV output.
pub fn escape_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Join already-extracted fields into one CSV line.
pub fn serialize_row(row: &TrendingRow) -> String {
    row.to_fields()
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Assemble the full file text: header line plus one line per row, each
/// newline-terminated.
pub fn serialize_file(header: &[&str], rows: &[TrendingRow]) -> String {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&serialize_row(row));
        out.push('\n');
    }
    out
}

/// Deterministic per-region filename for one capture date.
pub fn region_filename(trending_date: &str, region: &str) -> String {
    format!("{}_{}_videos.csv", trending_date, region)
}

/// Write a region's file, creating the output directory on first use. The
/// contents arrive fully assembled so the write is a single call and never
/// leaves a half-written file behind on an aborted run.
pub async fn write_region_file(
    output_dir: &Path,
    trending_date: &str,
    region: &str,
    contents: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(region_filename(trending_date, region));
    fs::write(&path, contents).await?;
    info!("💾 Wrote {}", path.display());

    Ok(path)
}
