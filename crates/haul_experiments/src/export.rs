//! Result export: CSV for spreadsheets, JSON for everything else.

use std::path::Path;

use crate::metrics::SimulationResult;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export simulation results to JSON format.
///
/// Creates a JSON file with an array of all results (serialized as JSON objects).
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export simulation results to CSV format, one row per run.
///
/// # Errors
///
/// Returns an error if `results` is empty, or if file creation or CSV writing fails.
pub fn export_to_csv(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, file)
}
