//! # Orgfit IO
//!
//! Filesystem edges of the pipeline: zip archives in and out, plus the
//! delimited files carrying manual known-component rows and audit logs.
//!
//! Everything between those edges operates on in-memory
//! [`NamedPayload`](orgfit_metadata::NamedPayload) values, so this crate is
//! the only one that touches disk.

mod archive;
mod error;
mod tabular;

pub use archive::{read_payloads, write_payloads};
pub use error::{IoError, Result};
pub use tabular::{read_rows, write_rows};
