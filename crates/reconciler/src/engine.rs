use indexmap::IndexSet;

use orgfit_metadata::{sections, Entry, Node, ProfileDocument};
use orgfit_registry::{Category, Registry};

use crate::audit::{LogEntry, Operation};
use crate::rules::{Describe, EntryTemplate, RuleKind, MASTER_RECORD_TYPE, REMOVE_REASON, RULES};

/// Apply every reconciliation rule to `doc`, in fixed pass order.
///
/// Returns the audit rows for this document, in mutation order. The caller
/// concatenates rows across documents to form the run-wide trail.
pub fn reconcile(doc: &mut ProfileDocument, registry: &Registry) -> Vec<LogEntry> {
    let mut log = Vec::new();

    for rule in &RULES {
        log::debug!("Reconciling `{}`: {}", doc.name, rule.section);
        let mut pass = Pass {
            doc: &mut *doc,
            registry,
            log: &mut log,
        };
        match rule.kind {
            RuleKind::Filter {
                reference,
                category,
                describe,
                remove_reason,
            } => pass.filter(rule.section, reference, category, describe, remove_reason),
            RuleKind::FilterAndSynthesize {
                reference,
                category,
                template,
                add_reason,
            } => pass.synthesize(rule.section, reference, category, template, add_reason, true),
            RuleKind::SynthesizeOnly {
                reference,
                category,
                template,
                add_reason,
            } => pass.synthesize(rule.section, reference, category, template, add_reason, false),
            RuleKind::FixedDelete { reason } => pass.delete(rule.section, reason),
        }
    }

    log
}

/// One rule application over one document.
///
/// Every pass rebuilds the node list instead of deleting in place, so
/// iteration never races its own mutations and retained entries keep their
/// relative order for free.
struct Pass<'a> {
    doc: &'a mut ProfileDocument,
    registry: &'a Registry,
    log: &'a mut Vec<LogEntry>,
}

impl Pass<'_> {
    /// Drop section entries whose reference is unknown to the registry.
    ///
    /// Entries without the reference value pass through untouched; for
    /// layout assignments that is the --Master-- convention at work, and
    /// elsewhere it keeps malformed entries out of harm's way.
    fn filter(
        &mut self,
        section: &str,
        reference: &str,
        category: Category,
        describe: Describe,
        reason: &str,
    ) {
        let nodes = std::mem::take(&mut self.doc.nodes);
        let mut next = Vec::with_capacity(nodes.len());

        for node in nodes {
            let keep = match entry_reference(&node, section, reference) {
                Some(value) => self.registry.contains(category, value),
                None => true,
            };
            if keep {
                next.push(node);
            } else if let Node::Entry(entry) = node {
                let component = describe_entry(&entry, reference, describe);
                self.push_row(section, component, Operation::Remove, reason);
            }
        }

        self.doc.nodes = next;
    }

    /// Reconcile a section against the full registry category.
    ///
    /// Known references are marked accounted for; unknown ones are dropped
    /// when `delete_unknown` is set and retained otherwise. Identifiers the
    /// registry knows but the document never declared are synthesized from
    /// the template, inserted right after the last kept entry of the
    /// section, or at the end of the document when the section is empty.
    fn synthesize(
        &mut self,
        section: &str,
        reference: &str,
        category: Category,
        template: EntryTemplate,
        add_reason: &str,
        delete_unknown: bool,
    ) {
        let mut missing: IndexSet<&str> = self.registry.identifiers(category).collect();

        let nodes = std::mem::take(&mut self.doc.nodes);
        let mut next = Vec::with_capacity(nodes.len());
        let mut last_kept: Option<usize> = None;

        for node in nodes {
            let keep = match entry_reference(&node, section, reference) {
                // A duplicate of an already-accounted reference is still a
                // registry member and is retained as-is.
                Some(value) => {
                    missing.shift_remove(value)
                        || !delete_unknown
                        || self.registry.contains(category, value)
                }
                None => true,
            };

            if keep {
                let in_section = node.tag() == section;
                next.push(node);
                if in_section {
                    last_kept = Some(next.len() - 1);
                }
            } else if let Node::Entry(entry) = node {
                let component = entry.value(reference).unwrap_or_default().to_string();
                self.push_row(section, component, Operation::Remove, REMOVE_REASON);
            }
        }

        let mut insert_at = last_kept.map_or(next.len(), |index| index + 1);
        for identifier in missing {
            next.insert(insert_at, Node::Entry(template.instantiate(section, identifier)));
            self.push_row(section, identifier.to_string(), Operation::Add, add_reason);
            insert_at += 1;
        }

        self.doc.nodes = next;
    }

    /// Unconditionally delete a section, one log row per occurrence
    fn delete(&mut self, section: &str, reason: &str) {
        let nodes = std::mem::take(&mut self.doc.nodes);
        let mut next = Vec::with_capacity(nodes.len());

        for node in nodes {
            if node.tag() == section {
                self.push_row(section, "n/a".to_string(), Operation::Remove, reason);
            } else {
                next.push(node);
            }
        }

        self.doc.nodes = next;
    }

    fn push_row(&mut self, section: &str, component: String, operation: Operation, reason: &str) {
        self.log.push(LogEntry {
            profile: self.doc.name.clone(),
            section: section.to_string(),
            component,
            operation,
            reason: reason.to_string(),
        });
    }
}

/// The entry's reference value, when `node` is an entry of `section`
/// carrying one
fn entry_reference<'n>(node: &'n Node, section: &str, reference: &str) -> Option<&'n str> {
    match node {
        Node::Entry(entry) if entry.tag == section => entry.value(reference),
        _ => None,
    }
}

/// Log description of a removed entry
fn describe_entry(entry: &Entry, reference: &str, describe: Describe) -> String {
    match describe {
        Describe::Reference => entry.value(reference).unwrap_or_default().to_string(),
        Describe::LayoutAssignment => describe_layout_assignment(entry),
    }
}

/// `<layout> to <record type>`. A missing record type is the implicit
/// --Master-- assignment; an entry with neither reference readable falls
/// back to the bare marker instead of failing.
fn describe_layout_assignment(entry: &Entry) -> String {
    let layout = entry.value(sections::LAYOUT);
    let record_type = entry.value(sections::RECORD_TYPE);
    match (layout, record_type) {
        (Some(layout), Some(record_type)) => format!("{layout} to {record_type}"),
        (Some(layout), None) => format!("{layout} to {MASTER_RECORD_TYPE}"),
        (None, Some(record_type)) => format!("to {record_type}"),
        (None, None) => MASTER_RECORD_TYPE.to_string(),
    }
}
