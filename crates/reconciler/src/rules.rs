use orgfit_metadata::{sections, Entry};
use orgfit_registry::Category;

/// Reason attached to registry-driven removals
pub const REMOVE_REASON: &str = "not found in target registry";
/// Reason for layout assignments dropped over their record type
pub const REMOVE_RECORD_TYPE_REASON: &str = "record type not found in target registry";
/// Reason for layout assignments dropped over their layout
pub const REMOVE_LAYOUT_REASON: &str = "layout not found in target registry";
/// Reason attached to the unconditional login-restriction removals
pub const POLICY_LOCK_REASON: &str = "policy lock — not modified during migration window";

/// Reason for synthesized object permissions
pub const ADD_OBJECT_REASON: &str = "synthesized with all object permissions disabled";
/// Reason for synthesized tab visibilities
pub const ADD_TAB_REASON: &str = "synthesized with visibility Hidden";
/// Reason for synthesized user permissions
pub const ADD_USER_PERMISSION_REASON: &str = "synthesized with enabled=false";

/// Description of the implicit record type a layout assignment without an
/// explicit one is assigned to
pub const MASTER_RECORD_TYPE: &str = "--Master--";

/// A value slot in a synthesized entry
#[derive(Debug, Clone, Copy)]
pub enum TemplateValue {
    /// Fixed default, e.g. `false` or `Hidden`
    Fixed(&'static str),
    /// The component identifier being synthesized
    Name,
}

/// Ordered child values of one synthesized entry
#[derive(Debug, Clone, Copy)]
pub struct EntryTemplate {
    pub values: &'static [(&'static str, TemplateValue)],
}

impl EntryTemplate {
    /// Build a concrete entry for one component identifier
    #[must_use]
    pub fn instantiate(&self, section: &str, name: &str) -> Entry {
        let mut entry = Entry::new(section);
        for (tag, value) in self.values {
            match value {
                TemplateValue::Fixed(fixed) => entry.push_value(*tag, *fixed),
                TemplateValue::Name => entry.push_value(*tag, name),
            }
        }
        entry
    }
}

/// Defaults granting no access to an object
const OBJECT_PERMISSION_DEFAULTS: EntryTemplate = EntryTemplate {
    values: &[
        ("allowCreate", TemplateValue::Fixed("false")),
        ("allowDelete", TemplateValue::Fixed("false")),
        ("allowEdit", TemplateValue::Fixed("false")),
        ("allowRead", TemplateValue::Fixed("false")),
        ("modifyAllRecords", TemplateValue::Fixed("false")),
        ("object", TemplateValue::Name),
        ("viewAllRecords", TemplateValue::Fixed("false")),
    ],
};

/// Defaults hiding a tab
const TAB_VISIBILITY_DEFAULTS: EntryTemplate = EntryTemplate {
    values: &[
        ("tab", TemplateValue::Name),
        ("visibility", TemplateValue::Fixed("Hidden")),
    ],
};

/// Defaults disabling a user permission
const USER_PERMISSION_DEFAULTS: EntryTemplate = EntryTemplate {
    values: &[
        ("enabled", TemplateValue::Fixed("false")),
        ("name", TemplateValue::Name),
    ],
};

/// How a removed entry is described in the audit log
#[derive(Debug, Clone, Copy)]
pub enum Describe {
    /// The component reference itself
    Reference,
    /// `<layout> to <record type>`, with the `--Master--` convention for
    /// assignments that carry no explicit record type
    LayoutAssignment,
}

/// Shape of one reconciliation pass over a section
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Drop entries whose reference is not in the registry category
    Filter {
        reference: &'static str,
        category: Category,
        describe: Describe,
        remove_reason: &'static str,
    },
    /// Drop unknown entries, then synthesize entries for every identifier
    /// the registry knows but the profile never declared
    FilterAndSynthesize {
        reference: &'static str,
        category: Category,
        template: EntryTemplate,
        add_reason: &'static str,
    },
    /// Synthesize missing entries but never drop existing ones
    SynthesizeOnly {
        reference: &'static str,
        category: Category,
        template: EntryTemplate,
        add_reason: &'static str,
    },
    /// Drop the section wholesale, registry or not
    FixedDelete { reason: &'static str },
}

/// One reconciliation rule: a section and the shape of its pass
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub section: &'static str,
    pub kind: RuleKind,
}

/// The fixed pass order.
///
/// Each pass touches one section; the two layout-assignment sub-rules share
/// a section but key on different references, record type first. Order
/// across sections only decides log readability, since sections are
/// disjoint.
pub const RULES: [SectionRule; 12] = [
    SectionRule {
        section: sections::APPLICATION_VISIBILITIES,
        kind: RuleKind::Filter {
            reference: sections::APPLICATION,
            category: Category::CustomApplication,
            describe: Describe::Reference,
            remove_reason: REMOVE_REASON,
        },
    },
    SectionRule {
        section: sections::CLASS_ACCESSES,
        kind: RuleKind::Filter {
            reference: sections::APEX_CLASS,
            category: Category::ApexClass,
            describe: Describe::Reference,
            remove_reason: REMOVE_REASON,
        },
    },
    SectionRule {
        section: sections::FIELD_PERMISSIONS,
        kind: RuleKind::Filter {
            reference: sections::FIELD,
            category: Category::Field,
            describe: Describe::Reference,
            remove_reason: REMOVE_REASON,
        },
    },
    SectionRule {
        section: sections::LAYOUT_ASSIGNMENTS,
        kind: RuleKind::Filter {
            reference: sections::RECORD_TYPE,
            category: Category::RecordType,
            describe: Describe::LayoutAssignment,
            remove_reason: REMOVE_RECORD_TYPE_REASON,
        },
    },
    SectionRule {
        section: sections::LAYOUT_ASSIGNMENTS,
        kind: RuleKind::Filter {
            reference: sections::LAYOUT,
            category: Category::Layout,
            describe: Describe::LayoutAssignment,
            remove_reason: REMOVE_LAYOUT_REASON,
        },
    },
    SectionRule {
        section: sections::OBJECT_PERMISSIONS,
        kind: RuleKind::FilterAndSynthesize {
            reference: sections::OBJECT,
            category: Category::CustomObject,
            template: OBJECT_PERMISSION_DEFAULTS,
            add_reason: ADD_OBJECT_REASON,
        },
    },
    SectionRule {
        section: sections::PAGE_ACCESSES,
        kind: RuleKind::Filter {
            reference: sections::APEX_PAGE,
            category: Category::ApexPage,
            describe: Describe::Reference,
            remove_reason: REMOVE_REASON,
        },
    },
    SectionRule {
        section: sections::RECORD_TYPE_VISIBILITIES,
        kind: RuleKind::Filter {
            reference: sections::RECORD_TYPE,
            category: Category::RecordType,
            describe: Describe::Reference,
            remove_reason: REMOVE_REASON,
        },
    },
    SectionRule {
        section: sections::TAB_VISIBILITIES,
        kind: RuleKind::FilterAndSynthesize {
            reference: sections::TAB,
            category: Category::CustomTab,
            template: TAB_VISIBILITY_DEFAULTS,
            add_reason: ADD_TAB_REASON,
        },
    },
    SectionRule {
        section: sections::USER_PERMISSIONS,
        kind: RuleKind::SynthesizeOnly {
            reference: sections::NAME,
            category: Category::UserPermission,
            template: USER_PERMISSION_DEFAULTS,
            add_reason: ADD_USER_PERMISSION_REASON,
        },
    },
    SectionRule {
        section: sections::LOGIN_HOURS,
        kind: RuleKind::FixedDelete {
            reason: POLICY_LOCK_REASON,
        },
    },
    SectionRule {
        section: sections::LOGIN_IP_RANGES,
        kind: RuleKind::FixedDelete {
            reason: POLICY_LOCK_REASON,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_templates_instantiate_in_declared_order() {
        let entry = OBJECT_PERMISSION_DEFAULTS.instantiate(sections::OBJECT_PERMISSIONS, "Widget__c");
        let names: Vec<&str> = entry.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "allowCreate",
                "allowDelete",
                "allowEdit",
                "allowRead",
                "modifyAllRecords",
                "object",
                "viewAllRecords"
            ]
        );
        assert_eq!(entry.value("object"), Some("Widget__c"));
        assert_eq!(entry.value("allowRead"), Some("false"));

        let tab = TAB_VISIBILITY_DEFAULTS.instantiate(sections::TAB_VISIBILITIES, "Order_Desk");
        assert_eq!(tab.value("tab"), Some("Order_Desk"));
        assert_eq!(tab.value("visibility"), Some("Hidden"));

        let permission = USER_PERMISSION_DEFAULTS.instantiate(sections::USER_PERMISSIONS, "ApiEnabled");
        assert_eq!(permission.value("enabled"), Some("false"));
        assert_eq!(permission.value("name"), Some("ApiEnabled"));
    }

    #[test]
    fn test_rule_table_lists_layout_assignments_twice() {
        let covered: Vec<&str> = RULES.iter().map(|rule| rule.section).collect();
        // layoutAssignments appears twice: record type sub-rule, then layout.
        assert_eq!(
            covered
                .iter()
                .filter(|s| **s == sections::LAYOUT_ASSIGNMENTS)
                .count(),
            2
        );
        assert_eq!(covered.len(), 12);
    }
}
