use orgfit_registry::Registry;
use serde::Serialize;

/// Identifier count for one registry category
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    /// Canonical category label
    pub category: String,

    /// Distinct identifiers known under it
    pub components: usize,
}

/// Summary of one prepare run
#[derive(Debug, Serialize)]
pub struct PrepareReport {
    /// Profiles reconciled and written
    pub profiles: usize,

    /// Entries synthesized across all profiles
    pub entries_added: usize,

    /// Entries deleted across all profiles
    pub entries_removed: usize,

    /// Registry composition the run reconciled against
    pub registry: Vec<CategoryCount>,

    /// Where the prepared archive was written
    pub out_path: String,

    /// Where the operations log was written
    pub log_path: String,
}

/// Registry inspection summary for the `knowns` subcommand
#[derive(Debug, Serialize)]
pub struct KnownsReport {
    pub registry: Vec<CategoryCount>,
}

/// Snapshot per-category counts, in canonical category order
pub fn category_counts(registry: &Registry) -> Vec<CategoryCount> {
    registry
        .counts()
        .into_iter()
        .map(|(category, components)| CategoryCount {
            category: category.to_string(),
            components,
        })
        .collect()
}
