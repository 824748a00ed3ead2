use std::borrow::Cow;
use std::collections::BTreeMap;

use indexmap::IndexSet;

use orgfit_metadata::percent_decode_name;

use crate::category::Category;

/// Known components of the target environment, keyed by category.
///
/// Within a category, identifiers keep first-insertion order. Synthesis
/// walks that order, so where a component was first declared decides where
/// its synthesized entry lands. Inserts and lookups share one canonical
/// form: record type identifiers are percent-decoded before comparison,
/// every other category compares verbatim.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sets: BTreeMap<Category, IndexSet<String>>,
}

impl Registry {
    /// True when `reference` is a known component of `category`
    #[must_use]
    pub fn contains(&self, category: Category, reference: &str) -> bool {
        let canonical = canonical_identifier(category, reference);
        self.sets
            .get(&category)
            .is_some_and(|set| set.contains(canonical.as_ref()))
    }

    /// Identifiers known for a category, in first-insertion order
    pub fn identifiers(&self, category: Category) -> impl Iterator<Item = &str> {
        self.sets
            .get(&category)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Number of identifiers known for a category
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.sets.get(&category).map_or(0, IndexSet::len)
    }

    /// True when nothing is known for a category
    #[must_use]
    pub fn is_empty(&self, category: Category) -> bool {
        self.len(category) == 0
    }

    /// Per-category sizes, in canonical category order
    #[must_use]
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.len(category)))
            .collect()
    }

    /// Total identifiers across all categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.sets.values().map(IndexSet::len).sum()
    }

    /// Insert one identifier; returns false when it was already known
    pub(crate) fn insert(&mut self, category: Category, identifier: &str) -> bool {
        let canonical = canonical_identifier(category, identifier).into_owned();
        self.sets.entry(category).or_default().insert(canonical)
    }
}

/// Canonical comparison form for one identifier
fn canonical_identifier(category: Category, raw: &str) -> Cow<'_, str> {
    match category {
        Category::RecordType => Cow::Owned(percent_decode_name(raw)),
        _ => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_contains_and_len() {
        let mut registry = Registry::default();
        assert!(registry.insert(Category::ApexClass, "OrderController"));
        assert!(registry.insert(Category::ApexClass, "QuoteBuilder"));
        assert!(!registry.insert(Category::ApexClass, "OrderController"));

        assert!(registry.contains(Category::ApexClass, "OrderController"));
        assert!(!registry.contains(Category::ApexClass, "Missing"));
        assert!(!registry.contains(Category::ApexPage, "OrderController"));
        assert_eq!(registry.len(Category::ApexClass), 2);
        assert!(registry.is_empty(Category::Layout));
        assert_eq!(registry.total(), 2);
    }

    #[test]
    fn test_identifiers_keep_first_insertion_order() {
        let mut registry = Registry::default();
        registry.insert(Category::CustomTab, "Order_Desk");
        registry.insert(Category::CustomTab, "Billing");
        registry.insert(Category::CustomTab, "Order_Desk");

        let tabs: Vec<&str> = registry.identifiers(Category::CustomTab).collect();
        assert_eq!(tabs, vec!["Order_Desk", "Billing"]);
    }

    #[test]
    fn test_record_types_compare_percent_decoded() {
        let mut registry = Registry::default();
        registry.insert(Category::RecordType, "Account.M%26D%20Sales");

        assert!(registry.contains(Category::RecordType, "Account.M&D Sales"));
        assert!(registry.contains(Category::RecordType, "Account.M%26D%20Sales"));
        assert!(!registry.contains(Category::RecordType, "Account.M26D Sales"));

        // The decoded form is also what identifiers() yields.
        let ids: Vec<&str> = registry.identifiers(Category::RecordType).collect();
        assert_eq!(ids, vec!["Account.M&D Sales"]);

        // Encoded and decoded declarations collapse to one identifier.
        assert!(!registry.insert(Category::RecordType, "Account.M&D Sales"));
        assert_eq!(registry.len(Category::RecordType), 1);
    }

    #[test]
    fn test_other_categories_compare_verbatim() {
        let mut registry = Registry::default();
        registry.insert(Category::CustomTab, "My%20Tab");
        assert!(registry.contains(Category::CustomTab, "My%20Tab"));
        assert!(!registry.contains(Category::CustomTab, "My Tab"));
    }

    #[test]
    fn test_counts_cover_every_category_in_order() {
        let mut registry = Registry::default();
        registry.insert(Category::UserPermission, "ApiEnabled");

        let counts = registry.counts();
        assert_eq!(counts.len(), Category::ALL.len());
        assert_eq!(counts[0], (Category::ApexClass, 0));
        assert_eq!(counts[8], (Category::UserPermission, 1));
    }
}
