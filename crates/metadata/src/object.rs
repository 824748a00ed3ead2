use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::xml::local_name_of;

/// Record type names declared by one custom object definition.
///
/// Reads `recordTypes/fullName` directly under the object root and nothing
/// else. Depth matters: record type blocks nest `picklistValues` whose value
/// entries carry their own `fullName` elements, and those must not leak in.
pub fn record_type_names(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut names = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(el) => stack.push(local_name_of(&el)),
            Event::Text(text) => {
                if stack.len() == 3 && stack[1] == "recordTypes" && stack[2] == "fullName" {
                    let name = text.unescape()?.trim().to_string();
                    if !name.is_empty() {
                        names.push(name);
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(names)
}
