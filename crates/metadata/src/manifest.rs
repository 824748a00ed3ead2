use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::Result;
use crate::xml::{local_name_of, write_leaf, INDENT, INDENT_WIDTH, METADATA_NAMESPACE};

/// API version stamped on generated manifests
pub const API_VERSION: &str = "29.0";

/// One `<types>` block of a manifest: a metadata type name and its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMembers {
    /// Metadata type, e.g. `ApexClass`
    pub name: String,

    /// Declared members, in manifest order
    pub members: Vec<String>,
}

/// A parsed environment manifest (`package.xml`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    pub types: Vec<TypeMembers>,
}

/// Parse a manifest into its `(type, members)` blocks.
///
/// Only `Package/types/{name,members}` is read; `version` and anything else
/// is ignored. A `types` block without a `name` contributes nothing. The
/// order of `name` relative to `members` inside a block does not matter.
pub fn parse_manifest(xml: &str) -> Result<PackageManifest> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut types = Vec::new();
    let mut members: Vec<String> = Vec::new();
    let mut type_name: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(el) => stack.push(local_name_of(&el)),
            Event::Text(text) => {
                if stack.len() == 3 && stack[1] == "types" {
                    let value = text.unescape()?.trim().to_string();
                    if value.is_empty() {
                        continue;
                    }
                    match stack[2].as_str() {
                        "members" => members.push(value),
                        "name" => type_name = Some(value),
                        _ => {}
                    }
                }
            }
            Event::End(_) => {
                if stack.len() == 2 && stack[1] == "types" {
                    match type_name.take() {
                        Some(name) => types.push(TypeMembers {
                            name,
                            members: std::mem::take(&mut members),
                        }),
                        None => {
                            log::warn!("Manifest types block without a name; ignored");
                            members.clear();
                        }
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(PackageManifest { types })
}

/// Render the manifest that accompanies prepared profiles: one `Profile`
/// types block listing the given names, pinned to [`API_VERSION`].
pub fn render_profile_manifest(profile_names: &[String]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), INDENT, INDENT_WIDTH);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("Package");
    root.push_attribute(("xmlns", METADATA_NAMESPACE));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("types")))?;
    for name in profile_names {
        write_leaf(&mut writer, "members", name)?;
    }
    write_leaf(&mut writer, "name", "Profile")?;
    writer.write_event(Event::End(BytesEnd::new("types")))?;

    write_leaf(&mut writer, "version", API_VERSION)?;
    writer.write_event(Event::End(BytesEnd::new("Package")))?;
    Ok(writer.into_inner())
}
