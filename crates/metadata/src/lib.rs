//! # Orgfit Metadata
//!
//! Document model and format adapters for Salesforce-style metadata XML.
//!
//! ## Philosophy
//!
//! Profile documents are treated as ordered lists of shallow elements, not
//! as schema-validated objects:
//! - Entries keep their original document order end to end
//! - Unknown sections and values pass through untouched
//! - Only the handful of shapes the reconciler needs are modeled
//!
//! ## Architecture
//!
//! ```text
//! Payload bytes (from an archive)
//!     │
//!     ├──> Profile XML      → ProfileDocument { Scalar | Entry } list
//!     │
//!     ├──> package.xml      → PackageManifest { types: [name, members] }
//!     │
//!     └──> Object XML       → record-type names (recordTypes/fullName)
//!
//! ProfileDocument ──write_document──> deterministic, indented XML bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use orgfit_metadata::parse_document;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <Profile xmlns="http://soap.sforce.com/2006/04/metadata">
//!     <custom>false</custom>
//!     <classAccesses>
//!         <apexClass>OrderController</apexClass>
//!         <enabled>true</enabled>
//!     </classAccesses>
//! </Profile>"#;
//!
//! let doc = parse_document("Admin", xml).unwrap();
//! assert_eq!(doc.name, "Admin");
//! assert_eq!(doc.entries("classAccesses").count(), 1);
//! ```

mod document;
mod error;
mod manifest;
mod names;
mod object;
mod payload;
pub mod sections;
mod xml;

pub use document::{Entry, EntryValue, Node, ProfileDocument, Scalar};
pub use error::{MetadataError, Result};
pub use manifest::{parse_manifest, render_profile_manifest, PackageManifest, TypeMembers, API_VERSION};
pub use names::{percent_decode_name, record_type_identifier};
pub use object::record_type_names;
pub use payload::{NamedPayload, PayloadKind, MANIFEST_FILENAME, OBJECT_SUFFIX, PROFILE_SUFFIX};
pub use xml::{parse_document, write_document, METADATA_NAMESPACE};
