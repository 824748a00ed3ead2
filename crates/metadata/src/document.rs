/// A parsed profile document: the root element's children, in document order.
///
/// The model is deliberately shallow. A profile is a flat sequence of
/// top-level elements; each is either a scalar field or a permission entry
/// holding flat name/value pairs. Nothing deeper occurs in profile payloads,
/// and the parser rejects anything deeper rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    /// Profile name, derived from the payload name by the caller
    pub name: String,

    /// Top-level nodes in original document order
    pub nodes: Vec<Node>,
}

impl ProfileDocument {
    /// Create an empty document
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Iterate the entries of one section, in document order
    pub fn entries<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.nodes.iter().filter_map(move |node| match node {
            Node::Entry(entry) if entry.tag == section => Some(entry),
            _ => None,
        })
    }
}

/// One element directly under the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Scalar field holding only text, e.g. `<custom>false</custom>`
    Scalar(Scalar),

    /// Permission entry with named child values, e.g. a `classAccesses` block
    Entry(Entry),
}

impl Node {
    /// Element name of either node shape
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Node::Scalar(scalar) => &scalar.tag,
            Node::Entry(entry) => &entry.tag,
        }
    }

    /// The entry, if this node is one
    #[must_use]
    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Node::Entry(entry) => Some(entry),
            Node::Scalar(_) => None,
        }
    }
}

/// A top-level scalar field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub tag: String,
    pub value: String,
}

/// A permission entry: one section element and its flat child values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Section tag, e.g. `classAccesses`
    pub tag: String,

    /// Child values in original order; duplicate names are kept as-is
    pub values: Vec<EntryValue>,
}

impl Entry {
    /// Create an entry with no values yet
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            values: Vec::new(),
        }
    }

    /// Builder-style value append
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_value(name, value);
        self
    }

    /// Append a child value
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push(EntryValue {
            name: name.into(),
            value: value.into(),
        });
    }

    /// First child value with the given name
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|value| value.name == name)
            .map(|value| value.value.as_str())
    }
}

/// One named child value of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryValue {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ProfileDocument {
        let mut doc = ProfileDocument::new("Admin");
        doc.nodes.push(Node::Scalar(Scalar {
            tag: "custom".to_string(),
            value: "false".to_string(),
        }));
        doc.nodes.push(Node::Entry(
            Entry::new("classAccesses")
                .with_value("apexClass", "OrderController")
                .with_value("enabled", "true"),
        ));
        doc.nodes.push(Node::Entry(
            Entry::new("classAccesses")
                .with_value("apexClass", "QuoteBuilder")
                .with_value("enabled", "false"),
        ));
        doc
    }

    #[test]
    fn test_entry_value_lookup() {
        let entry = Entry::new("tabVisibilities")
            .with_value("tab", "Order_Desk")
            .with_value("visibility", "DefaultOn");
        assert_eq!(entry.value("tab"), Some("Order_Desk"));
        assert_eq!(entry.value("visibility"), Some("DefaultOn"));
        assert_eq!(entry.value("missing"), None);
    }

    #[test]
    fn test_duplicate_value_names_return_first() {
        let entry = Entry::new("layoutAssignments")
            .with_value("layout", "Account-First")
            .with_value("layout", "Account-Second");
        assert_eq!(entry.value("layout"), Some("Account-First"));
    }

    #[test]
    fn test_section_iteration_preserves_order() {
        let doc = sample();
        let classes: Vec<&str> = doc
            .entries("classAccesses")
            .filter_map(|entry| entry.value("apexClass"))
            .collect();
        assert_eq!(classes, vec!["OrderController", "QuoteBuilder"]);
        assert_eq!(doc.entries("pageAccesses").count(), 0);
    }

    #[test]
    fn test_node_tag_covers_both_shapes() {
        let doc = sample();
        let tags: Vec<&str> = doc.nodes.iter().map(Node::tag).collect();
        assert_eq!(tags, vec!["custom", "classAccesses", "classAccesses"]);
        assert!(doc.nodes[0].as_entry().is_none());
        assert!(doc.nodes[1].as_entry().is_some());
    }
}
