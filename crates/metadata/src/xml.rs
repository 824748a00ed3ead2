use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::document::{Entry, EntryValue, Node, ProfileDocument, Scalar};
use crate::error::{MetadataError, Result};

/// Namespace stamped on every document this crate writes
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

pub(crate) const INDENT: u8 = b' ';
pub(crate) const INDENT_WIDTH: usize = 4;

/// Parse a profile payload into its ordered node list.
///
/// The root element's name and attributes are not validated; the payload was
/// already selected by its name. Comments, processing instructions and
/// whitespace between elements are dropped. Anything nested deeper than
/// section/value is rejected.
pub fn parse_document(name: &str, xml: &str) -> Result<ProfileDocument> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(el) => {
                if root_seen {
                    nodes.push(parse_node(&mut reader, &el)?);
                } else {
                    root_seen = true;
                }
            }
            Event::Empty(el) => {
                if root_seen {
                    nodes.push(Node::Scalar(Scalar {
                        tag: local_name_of(&el),
                        value: String::new(),
                    }));
                } else {
                    // Self-closing root; the document has no entries.
                    root_seen = true;
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    log::warn!("Ignoring stray text outside any section: {:?}", text.trim());
                }
            }
            Event::End(_) => {}
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(MetadataError::MissingRoot);
    }

    Ok(ProfileDocument {
        name: name.to_string(),
        nodes,
    })
}

/// Parse one top-level element: a scalar if it holds only text, an entry if
/// it holds child values.
fn parse_node(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Node> {
    let tag = local_name_of(start);
    let mut text = String::new();
    let mut values: Vec<EntryValue> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(child) => {
                values.push(read_value(reader, &child)?);
            }
            Event::Empty(child) => {
                values.push(EntryValue {
                    name: local_name_of(&child),
                    value: String::new(),
                });
            }
            Event::Text(chunk) => text.push_str(&chunk.unescape()?),
            Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk.into_inner())),
            Event::End(_) => break,
            Event::Eof => return Err(MetadataError::Truncated(tag)),
            _ => {}
        }
    }

    if values.is_empty() {
        Ok(Node::Scalar(Scalar {
            tag,
            value: text.trim().to_string(),
        }))
    } else {
        if !text.trim().is_empty() {
            log::warn!("Ignoring stray text inside `{tag}`: {:?}", text.trim());
        }
        Ok(Node::Entry(Entry { tag, values }))
    }
}

/// Parse one entry value. Values are leaves; a further level of nesting
/// means the payload is not a profile this model understands.
fn read_value(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<EntryValue> {
    let name = local_name_of(start);
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(inner) => {
                return Err(MetadataError::NestedElement {
                    parent: name,
                    child: local_name_of(&inner),
                });
            }
            Event::Text(chunk) => value.push_str(&chunk.unescape()?),
            Event::CData(chunk) => value.push_str(&String::from_utf8_lossy(&chunk.into_inner())),
            Event::End(_) => break,
            Event::Eof => return Err(MetadataError::Truncated(name)),
            _ => {}
        }
    }

    Ok(EntryValue {
        name,
        value: value.trim().to_string(),
    })
}

pub(crate) fn local_name_of(el: &BytesStart) -> String {
    String::from_utf8_lossy(el.local_name().as_ref()).into_owned()
}

/// Serialize a document back to indented XML bytes.
///
/// Output is deterministic for a given document: four-space indentation, a
/// UTF-8 declaration, and the metadata namespace on the root. Reserved XML
/// characters in values are escaped on the way out.
pub fn write_document(doc: &ProfileDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), INDENT, INDENT_WIDTH);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("Profile");
    root.push_attribute(("xmlns", METADATA_NAMESPACE));
    writer.write_event(Event::Start(root))?;

    for node in &doc.nodes {
        match node {
            Node::Scalar(scalar) => write_leaf(&mut writer, &scalar.tag, &scalar.value)?,
            Node::Entry(entry) => {
                writer.write_event(Event::Start(BytesStart::new(entry.tag.as_str())))?;
                for value in &entry.values {
                    write_leaf(&mut writer, &value.name, &value.value)?;
                }
                writer.write_event(Event::End(BytesEnd::new(entry.tag.as_str())))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("Profile")))?;
    Ok(writer.into_inner())
}

pub(crate) fn write_leaf<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>false</custom>
    <classAccesses>
        <apexClass>OrderController</apexClass>
        <enabled>true</enabled>
    </classAccesses>
    <fieldPermissions>
        <editable>true</editable>
        <field>Account.M&amp;D_Code__c</field>
        <readable>true</readable>
    </fieldPermissions>
    <description/>
</Profile>"#;

    #[test]
    fn test_parse_scalars_and_entries_in_order() {
        let doc = parse_document("Admin", SAMPLE).unwrap();
        assert_eq!(doc.name, "Admin");

        let tags: Vec<&str> = doc.nodes.iter().map(Node::tag).collect();
        assert_eq!(
            tags,
            vec!["custom", "classAccesses", "fieldPermissions", "description"]
        );

        match &doc.nodes[0] {
            Node::Scalar(scalar) => assert_eq!(scalar.value, "false"),
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unescapes_values() {
        let doc = parse_document("Admin", SAMPLE).unwrap();
        let entry = doc.entries("fieldPermissions").next().unwrap();
        assert_eq!(entry.value("field"), Some("Account.M&D_Code__c"));
    }

    #[test]
    fn test_parse_empty_element_is_empty_scalar() {
        let doc = parse_document("Admin", SAMPLE).unwrap();
        match &doc.nodes[3] {
            Node::Scalar(scalar) => {
                assert_eq!(scalar.tag, "description");
                assert_eq!(scalar.value, "");
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_skips_comments_and_namespace_prefixes() {
        let xml = r#"<Profile>
            <!-- exported 2013-11-02 -->
            <met:custom xmlns:met="urn:x">true</met:custom>
        </Profile>"#;
        let doc = parse_document("P", xml).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].tag(), "custom");
    }

    #[test]
    fn test_parse_rejects_nesting_below_values() {
        let xml = "<Profile><layoutAssignments><layout><inner>x</inner></layout></layoutAssignments></Profile>";
        let err = parse_document("P", xml).unwrap_err();
        assert!(matches!(err, MetadataError::NestedElement { .. }), "{err}");
    }

    #[test]
    fn test_parse_rejects_empty_and_truncated_payloads() {
        assert!(matches!(
            parse_document("P", "  "),
            Err(MetadataError::MissingRoot)
        ));
        assert!(parse_document("P", "<Profile><classAccesses>").is_err());
    }

    #[test]
    fn test_write_round_trips_through_parse() {
        let original = parse_document("Admin", SAMPLE).unwrap();
        let bytes = write_document(&original).unwrap();
        let reparsed = parse_document("Admin", &String::from_utf8(bytes).unwrap()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_write_emits_declaration_namespace_and_indentation() {
        let mut doc = ProfileDocument::new("Admin");
        doc.nodes.push(Node::Entry(
            Entry::new("tabVisibilities")
                .with_value("tab", "Order_Desk")
                .with_value("visibility", "Hidden"),
        ));

        let text = String::from_utf8(write_document(&doc).unwrap()).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#), "{text}");
        assert!(
            text.contains(r#"<Profile xmlns="http://soap.sforce.com/2006/04/metadata">"#),
            "{text}"
        );
        assert!(text.contains("\n    <tabVisibilities>"), "{text}");
        assert!(text.contains("\n        <tab>Order_Desk</tab>"), "{text}");
        assert!(text.ends_with("</Profile>"), "{text}");
    }

    #[test]
    fn test_write_escapes_reserved_characters() {
        let mut doc = ProfileDocument::new("Admin");
        doc.nodes.push(Node::Entry(
            Entry::new("recordTypeVisibilities").with_value("recordType", "Account.M&D Sales"),
        ));

        let text = String::from_utf8(write_document(&doc).unwrap()).unwrap();
        assert!(text.contains("<recordType>Account.M&amp;D Sales</recordType>"), "{text}");
    }
}
