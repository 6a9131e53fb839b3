//! Table display and CSV export for batch results.
//!
//! Described and failed groups are rendered uniformly: the failure message
//! sits where the description would.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use vestiary_core::DescriptionResult;

#[derive(Serialize)]
struct CsvRow<'a> {
    item_id: &'a str,
    description: &'a str,
}

/// Print an aligned two-column table; failed groups are marked with `!`.
pub fn print_table(results: &[DescriptionResult]) {
    let width =
        results.iter().map(|r| r.group_id.len()).max().unwrap_or(0).max("item_id".len());

    println!("{:<width$}   description", "item_id");
    for result in results {
        let marker = if result.outcome.is_failed() { '!' } else { ' ' };
        println!("{:<width$} {} {}", result.group_id, marker, result.outcome.text());
    }
}

/// Write `item_id,description` rows; the header comes from the first row's
/// field names.
pub fn write_csv(path: &Path, results: &[DescriptionResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(CsvRow {
            item_id: &result.group_id,
            description: result.outcome.text(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
