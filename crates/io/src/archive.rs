use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use orgfit_metadata::NamedPayload;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::Result;

/// Read every file in a zip archive into memory.
///
/// Directory entries are skipped. Payload order follows the archive listing,
/// which downstream passes rely on for deterministic output.
pub fn read_payloads(path: &Path) -> Result<Vec<NamedPayload>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut payloads = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        payloads.push(NamedPayload::new(entry.name(), bytes));
    }
    log::debug!("Read {} payloads from {}", payloads.len(), path.display());
    Ok(payloads)
}

/// Write payloads to a fresh zip archive at `path`, in slice order.
pub fn write_payloads(path: &Path, payloads: &[NamedPayload]) -> Result<()> {
    let file = File::create(path)?;
    let mut archive = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default();

    for payload in payloads {
        archive.start_file(payload.name.as_str(), options)?;
        archive.write_all(&payload.bytes)?;
    }
    let mut inner = archive.finish()?;
    inner.flush()?;
    log::debug!("Wrote {} payloads to {}", payloads.len(), path.display());
    Ok(())
}
