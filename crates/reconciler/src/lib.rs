//! # Orgfit Reconciler
//!
//! Applies the reconciliation rules to one profile document at a time.
//! Entries referring to components the target environment does not have are
//! removed. Entries the target requires but the profile omits are
//! synthesized with locked-down defaults, and login restrictions are
//! stripped wholesale.
//!
//! ## Rule shapes
//!
//! ```text
//! Filter                 drop entries whose reference is unknown
//! FilterAndSynthesize    drop unknown, then add missing with defaults
//! SynthesizeOnly         add missing with defaults, never drop
//! FixedDelete            drop the section regardless of the registry
//! ```
//!
//! Every rule reads the registry and rewrites the document's node list
//! functionally; nothing mutates a section while iterating it. Each call
//! returns its audit rows, and the caller owns the run-wide trail.

mod audit;
mod engine;
mod rules;

pub use audit::{LogEntry, Operation};
pub use engine::reconcile;
pub use rules::{
    Describe, EntryTemplate, RuleKind, SectionRule, TemplateValue, ADD_OBJECT_REASON,
    ADD_TAB_REASON, ADD_USER_PERMISSION_REASON, MASTER_RECORD_TYPE, POLICY_LOCK_REASON,
    REMOVE_LAYOUT_REASON, REMOVE_REASON, REMOVE_RECORD_TYPE_REASON, RULES,
};
