//! # Orgfit Registry
//!
//! The known-component registry: which components actually exist in the
//! target environment, grouped by permission category.
//!
//! ## Sources
//!
//! A registry is the union of four independent sources:
//!
//! ```text
//! manual rows (CSV)            identifier, category-label
//! environment manifest         members of allow-listed metadata types
//! object definitions           record types, qualified as Object.RecordType
//! first reference profile      field permissions (first match wins)
//! ```
//!
//! Source order decides first-insertion order within a category, and that
//! order is what synthesis later walks. Duplicate contributions collapse
//! silently; a registry never says how often a component was declared.

mod builder;
mod category;
mod registry;

pub use builder::{build_registry, RegistryBuilder};
pub use category::Category;
pub use registry::Registry;
