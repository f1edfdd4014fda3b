//! Sectioned catalog construction.
//!
//! # Responsibility
//! - Partition a flat row sequence into per-section record buckets.
//! - Keep the within-section ordering contract in one place.
//!
//! # Invariants
//! - Every input record lands in exactly the bucket named by its `section`;
//!   nothing is dropped or duplicated.
//! - Within a section, records appear in reverse retrieval order (the most
//!   recently read row first). This is a presentation choice, not a data
//!   integrity rule.
//!
//! # See also
//! - docs/architecture/data-access.md

use crate::model::process::ProcessRecord;
use std::collections::BTreeMap;

/// In-memory, section-partitioned view of all process records for one load.
///
/// `BTreeMap` keeps section iteration order deterministic (lexicographic),
/// so a menu rendered from the catalog is stable across loads.
pub type SectionedCatalog = BTreeMap<String, Vec<ProcessRecord>>;

/// Partitions records into a [`SectionedCatalog`].
///
/// `records` must be in retrieval order; each section bucket ends up with
/// the last-retrieved record first.
pub fn partition_records(records: Vec<ProcessRecord>) -> SectionedCatalog {
    let mut catalog = SectionedCatalog::new();
    for record in records {
        catalog
            .entry(record.section.clone())
            .or_default()
            .push(record);
    }
    for bucket in catalog.values_mut() {
        bucket.reverse();
    }
    catalog
}
