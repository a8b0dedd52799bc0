use crate::metrics::SimulationResult;

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    // Header comes from the struct's field names.
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}
