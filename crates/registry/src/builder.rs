use orgfit_metadata::{
    parse_document, parse_manifest, record_type_identifier, record_type_names, sections,
    NamedPayload, PackageManifest, PayloadKind, ProfileDocument,
};

use crate::category::Category;
use crate::registry::Registry;

/// Accumulates known components from the four registry sources: manual
/// rows, the environment manifest, object definitions, and one reference
/// profile's field permissions.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
    fields_populated: bool,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb manual rows of `identifier, category-label`.
    ///
    /// Rows arriving here are data; the header row is the reader's problem.
    /// Rows with fewer than two columns or an unrecognized label are skipped
    /// with a warning, extra columns are ignored.
    pub fn add_manual_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        for row in rows {
            let (Some(identifier), Some(label)) = (row.first(), row.get(1)) else {
                log::warn!("Skipping manual row {row:?}: expected `identifier, category`");
                continue;
            };
            match Category::from_label(label) {
                Some(category) => {
                    self.registry.insert(category, identifier);
                }
                None => {
                    log::warn!(
                        "Skipping manual row for `{identifier}`: unknown category label `{label}`"
                    );
                }
            }
        }
    }

    /// Absorb the members of every allow-listed type in a manifest
    pub fn absorb_manifest(&mut self, manifest: &PackageManifest) {
        for block in &manifest.types {
            let Some(category) = Category::from_manifest_type(&block.name) else {
                log::debug!("Manifest type `{}` is not reconciled; skipped", block.name);
                continue;
            };
            for member in &block.members {
                self.registry.insert(category, member);
            }
        }
    }

    /// Absorb one object definition's record types, qualified by object name
    pub fn absorb_object(&mut self, object_name: &str, record_types: &[String]) {
        for record_type in record_types {
            let identifier = record_type_identifier(object_name, record_type);
            self.registry.insert(Category::RecordType, &identifier);
        }
    }

    /// Absorb field permissions from a candidate reference profile.
    ///
    /// Only the first profile that actually carries field permissions wins;
    /// once the field category is populated, later candidates are ignored.
    /// Returns true when this document populated it.
    pub fn absorb_reference_profile(&mut self, doc: &ProfileDocument) -> bool {
        if self.fields_populated {
            return false;
        }

        let mut populated = false;
        for entry in doc.entries(sections::FIELD_PERMISSIONS) {
            if let Some(field) = entry.value(sections::FIELD) {
                self.registry.insert(Category::Field, field);
                populated = true;
            }
        }

        if populated {
            self.fields_populated = true;
            log::info!(
                "Field permissions sourced from profile `{}` ({} fields)",
                doc.name,
                self.registry.len(Category::Field)
            );
        }
        populated
    }

    /// Finish building
    #[must_use]
    pub fn finish(self) -> Registry {
        self.registry
    }
}

/// Build a registry from manual rows plus a target environment's payloads.
///
/// Manual rows land first, then the manifest and every object definition in
/// archive listing order, then the first profile carrying field permissions.
/// Unparseable payloads contribute nothing beyond a warning; the registry
/// that results is a plain union, so a missing source never fails the build.
#[must_use]
pub fn build_registry(manual_rows: Vec<Vec<String>>, payloads: &[NamedPayload]) -> Registry {
    let mut builder = RegistryBuilder::new();
    builder.add_manual_rows(manual_rows);

    for payload in payloads {
        match payload.kind() {
            Some(PayloadKind::Manifest) => match parse_manifest(&payload.text()) {
                Ok(manifest) => builder.absorb_manifest(&manifest),
                Err(err) => log::warn!("Unparseable manifest `{}`: {err}", payload.name),
            },
            Some(PayloadKind::ObjectDefinition) => match record_type_names(&payload.text()) {
                Ok(names) => builder.absorb_object(payload.stem(), &names),
                Err(err) => log::warn!("Unparseable object definition `{}`: {err}", payload.name),
            },
            Some(PayloadKind::Profile) | None => {}
        }
    }

    for payload in payloads {
        if payload.kind() != Some(PayloadKind::Profile) {
            continue;
        }
        match parse_document(payload.stem(), &payload.text()) {
            Ok(doc) => {
                if builder.absorb_reference_profile(&doc) {
                    break;
                }
            }
            Err(err) => {
                log::warn!(
                    "Unparseable profile `{}` skipped as field reference: {err}",
                    payload.name
                );
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(raw: &[(&str, &str)]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|(id, label)| vec![id.to_string(), label.to_string()])
            .collect()
    }

    fn payload(name: &str, xml: &str) -> NamedPayload {
        NamedPayload::new(name, xml.as_bytes().to_vec())
    }

    #[test]
    fn test_manual_rows_accept_every_label() {
        let mut builder = RegistryBuilder::new();
        builder.add_manual_rows(rows(&[
            ("OrderController", "ApexClass"),
            ("OrderStatus", "ApexPage"),
            ("Console", "CustomApplication"),
            ("Widget__c", "CustomObject"),
            ("Order_Desk", "CustomTab"),
            ("Account.Rating", "fields"),
            ("Account-Account Layout", "Layout"),
            ("Account.Partner", "recordTypes"),
            ("ApiEnabled", "userPermissions"),
        ]));

        let registry = builder.finish();
        for category in Category::ALL {
            assert_eq!(registry.len(category), 1, "{category}");
        }
    }

    #[test]
    fn test_manual_rows_skip_garbage() {
        let mut builder = RegistryBuilder::new();
        builder.add_manual_rows(vec![
            vec!["OnlyOneColumn".to_string()],
            vec!["Order_Desk".to_string(), "StandardTab".to_string()],
            vec![],
            vec!["Order_Desk".to_string(), "CustomTab".to_string(), "extra".to_string()],
        ]);

        let registry = builder.finish();
        assert_eq!(registry.total(), 1);
        assert!(registry.contains(Category::CustomTab, "Order_Desk"));
    }

    #[test]
    fn test_manifest_members_respect_allow_list() {
        let manifest = parse_manifest(
            r#"<Package>
                <types><members>OrderController</members><name>ApexClass</name></types>
                <types><members>Admin</members><name>Profile</name></types>
                <types><members>Account.Partner</members><name>RecordType</name></types>
            </Package>"#,
        )
        .unwrap();

        let mut builder = RegistryBuilder::new();
        builder.absorb_manifest(&manifest);
        let registry = builder.finish();

        assert!(registry.contains(Category::ApexClass, "OrderController"));
        assert!(registry.contains(Category::RecordType, "Account.Partner"));
        // Profile members are deployment targets, not known components.
        assert_eq!(registry.total(), 2);
    }

    #[test]
    fn test_object_record_types_are_qualified() {
        let mut builder = RegistryBuilder::new();
        builder.absorb_object("Account", &["Partner".to_string(), "Direct".to_string()]);
        let registry = builder.finish();

        assert!(registry.contains(Category::RecordType, "Account.Partner"));
        assert!(registry.contains(Category::RecordType, "Account.Direct"));
        assert!(!registry.contains(Category::RecordType, "Partner"));
    }

    #[test]
    fn test_first_field_bearing_profile_wins() {
        let empty = parse_document(
            "Empty",
            "<Profile><userLicense>Salesforce</userLicense></Profile>",
        )
        .unwrap();
        let first = parse_document(
            "First",
            r#"<Profile>
                <fieldPermissions><editable>true</editable><field>Account.Rating</field></fieldPermissions>
            </Profile>"#,
        )
        .unwrap();
        let second = parse_document(
            "Second",
            r#"<Profile>
                <fieldPermissions><field>Account.Industry</field></fieldPermissions>
            </Profile>"#,
        )
        .unwrap();

        let mut builder = RegistryBuilder::new();
        assert!(!builder.absorb_reference_profile(&empty));
        assert!(builder.absorb_reference_profile(&first));
        assert!(!builder.absorb_reference_profile(&second));

        let registry = builder.finish();
        assert!(registry.contains(Category::Field, "Account.Rating"));
        assert!(!registry.contains(Category::Field, "Account.Industry"));
    }

    #[test]
    fn test_build_registry_unions_all_sources() {
        let payloads = vec![
            payload(
                "unpackaged/package.xml",
                r#"<Package>
                    <types><members>Order_Desk</members><name>CustomTab</name></types>
                    <types><members>Widget__c</members><name>CustomObject</name></types>
                </Package>"#,
            ),
            payload(
                "unpackaged/objects/Account.object",
                r#"<CustomObject>
                    <recordTypes><fullName>Partner</fullName></recordTypes>
                </CustomObject>"#,
            ),
            payload(
                "unpackaged/profiles/Admin.profile",
                "<Profile><userLicense>Salesforce</userLicense></Profile>",
            ),
            payload(
                "unpackaged/profiles/Standard.profile",
                "<Profile><fieldPermissions><field>Account.Rating</field></fieldPermissions></Profile>",
            ),
        ];

        // The tab is declared both manually and by the manifest; the union
        // keeps one copy.
        let registry = build_registry(rows(&[("Order_Desk", "CustomTab")]), &payloads);

        assert_eq!(registry.len(Category::CustomTab), 1);
        assert!(registry.contains(Category::CustomObject, "Widget__c"));
        assert!(registry.contains(Category::RecordType, "Account.Partner"));
        assert!(registry.contains(Category::Field, "Account.Rating"));
    }

    #[test]
    fn test_build_registry_tolerates_garbage_payloads() {
        let payloads = vec![
            payload("unpackaged/package.xml", "<Package><types>"),
            payload("unpackaged/objects/Broken.object", "not xml at all <"),
            payload("unpackaged/profiles/Broken.profile", "<Profile><unclosed>"),
            payload(
                "unpackaged/profiles/Good.profile",
                "<Profile><fieldPermissions><field>Account.Rating</field></fieldPermissions></Profile>",
            ),
        ];

        let registry = build_registry(Vec::new(), &payloads);
        assert!(registry.contains(Category::Field, "Account.Rating"));
        assert_eq!(registry.total(), 1);
    }
}
