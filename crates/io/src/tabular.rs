use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;

/// Read a comma-delimited file into rows of strings.
///
/// The first record is a header and is skipped. Rows may vary in width,
/// hand-maintained files often do; consumers validate the columns they need.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write rows under a header to a comma-delimited file at `path`.
pub fn write_rows(path: &Path, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
