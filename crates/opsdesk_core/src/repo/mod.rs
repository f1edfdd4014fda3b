//! Repository layer: typed access to process records.
//!
//! # Responsibility
//! - Own every statement that reads the process table.
//! - Map store rows into [`crate::model`] types.
//! - Return typed results; the service layer decides how failures degrade.
//!
//! # See also
//! - docs/architecture/data-access.md

pub mod memory;
pub mod process_repo;
