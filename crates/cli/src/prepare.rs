use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use orgfit_io::{read_payloads, read_rows, write_payloads, write_rows};
use orgfit_metadata::{
    parse_document, render_profile_manifest, write_document, NamedPayload, PayloadKind,
    MANIFEST_FILENAME, PROFILE_SUFFIX,
};
use orgfit_reconciler::{reconcile, LogEntry, Operation};
use orgfit_registry::{build_registry, Registry};

use crate::report::{category_counts, PrepareReport};

/// Resolved inputs and outputs of one prepare run
pub struct PrepareOptions {
    pub source: PathBuf,
    pub target: PathBuf,
    pub knowns: PathBuf,
    pub out: PathBuf,
    pub log: PathBuf,
}

/// Build the known-component registry from manual rows and a target archive
pub fn build_registry_from(target: &Path, knowns: &Path) -> Result<Registry> {
    ensure_exists(target)?;
    ensure_exists(knowns)?;

    let rows = read_rows(knowns)
        .with_context(|| format!("Failed to read known components from {}", knowns.display()))?;
    let payloads = read_payloads(target)
        .with_context(|| format!("Failed to read target archive {}", target.display()))?;
    Ok(build_registry(rows, &payloads))
}

/// Run the full prepare pipeline: build the registry, reconcile every
/// profile in the source archive, write the output archive and the
/// operations log.
pub fn run(options: &PrepareOptions) -> Result<PrepareReport> {
    ensure_exists(&options.source)?;
    let registry = build_registry_from(&options.target, &options.knowns)?;
    for (category, components) in registry.counts() {
        log::info!("Known {category}: {components}");
    }

    let source = read_payloads(&options.source)
        .with_context(|| format!("Failed to read source archive {}", options.source.display()))?;

    let mut outputs: Vec<NamedPayload> = Vec::new();
    let mut rows: Vec<LogEntry> = Vec::new();
    let mut profiles: Vec<String> = Vec::new();

    for payload in &source {
        if payload.kind() != Some(PayloadKind::Profile) {
            continue;
        }
        let name = payload.stem().to_string();
        log::info!("Reconciling profile `{name}`");

        let mut doc = parse_document(&name, &payload.text())
            .with_context(|| format!("Failed to parse profile {}", payload.name))?;
        rows.extend(reconcile(&mut doc, &registry));

        let bytes =
            write_document(&doc).with_context(|| format!("Failed to serialize profile {name}"))?;
        outputs.push(NamedPayload::new(
            format!("profiles/{name}{PROFILE_SUFFIX}"),
            bytes,
        ));
        profiles.push(name);
    }

    if profiles.is_empty() {
        log::warn!("No profile payloads found in {}", options.source.display());
    }

    let manifest = render_profile_manifest(&profiles).context("Failed to render manifest")?;
    outputs.push(NamedPayload::new(MANIFEST_FILENAME, manifest));

    write_payloads(&options.out, &outputs)
        .with_context(|| format!("Failed to write output archive {}", options.out.display()))?;

    let log_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|entry| entry.to_row().iter().map(|field| field.to_string()).collect())
        .collect();
    write_rows(&options.log, &LogEntry::CSV_HEADER, &log_rows)
        .with_context(|| format!("Failed to write operations log {}", options.log.display()))?;

    let entries_added = rows
        .iter()
        .filter(|row| row.operation == Operation::Add)
        .count();
    let entries_removed = rows.len() - entries_added;

    Ok(PrepareReport {
        profiles: profiles.len(),
        entries_added,
        entries_removed,
        registry: category_counts(&registry),
        out_path: options.out.display().to_string(),
        log_path: options.log.display().to_string(),
    })
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Path not found: {}", path.display());
    }
    Ok(())
}
