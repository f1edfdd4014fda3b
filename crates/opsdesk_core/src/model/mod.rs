//! Domain model for operational process documents.
//!
//! # Responsibility
//! - Define the canonical data structures shared by the data access layer
//!   and the lookup/catalog services.
//! - Own the section-partitioning transform applied to loaded rows.
//!
//! # Invariants
//! - Model types are plain data: no store handles, no I/O.
//!
//! # See also
//! - docs/architecture/data-access.md

pub mod catalog;
pub mod process;
