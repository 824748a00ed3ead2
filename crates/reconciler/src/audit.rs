use std::fmt;

/// Mutation applied to a profile entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

impl Operation {
    /// Column value used in the operations log
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Remove => "Remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit row: which profile was touched, where, what, and why.
///
/// Rows are produced in mutation order and only ever appended. A run's
/// trail is the concatenation of every profile's rows, so dropped entries
/// stay accounted for even though they leave the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Profile the mutation applied to
    pub profile: String,

    /// Section tag, e.g. `objectPermissions`
    pub section: String,

    /// Component reference, or a derived description for layout assignments
    pub component: String,

    pub operation: Operation,

    /// Why the mutation happened
    pub reason: String,
}

impl LogEntry {
    /// Header row of the operations log
    pub const CSV_HEADER: [&'static str; 5] =
        ["Profile Name", "Section", "Component", "Operation", "Reason"];

    /// This row's log columns, in header order
    #[must_use]
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.profile,
            &self.section,
            &self.component,
            self.operation.as_str(),
            &self.reason,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_matches_header_order() {
        let entry = LogEntry {
            profile: "Admin".to_string(),
            section: "classAccesses".to_string(),
            component: "OrderController".to_string(),
            operation: Operation::Remove,
            reason: "not found in target registry".to_string(),
        };
        assert_eq!(
            entry.to_row(),
            ["Admin", "classAccesses", "OrderController", "Remove", "not found in target registry"]
        );
        assert_eq!(LogEntry::CSV_HEADER.len(), entry.to_row().len());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Add.to_string(), "Add");
        assert_eq!(Operation::Remove.to_string(), "Remove");
    }
}
