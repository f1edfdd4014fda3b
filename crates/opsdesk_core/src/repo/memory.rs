//! In-process repository backend.
//!
//! # Responsibility
//! - Serve the [`ProcessRepository`] contract from records held in memory.
//! - Mirror the PostgreSQL matching semantics exactly, so tests written
//!   against this backend describe the production behavior.
//!
//! # Invariants
//! - Matching is case-insensitive literal substring over title and content.
//! - Ties resolve by `(title, content)` ascending, like the SQL `ORDER BY`.

use crate::model::catalog::{partition_records, SectionedCatalog};
use crate::model::process::{ProcessMatch, ProcessRecord};
use crate::repo::process_repo::{ProcessRepository, RepoResult};
use async_trait::async_trait;

/// In-memory implementation of [`ProcessRepository`].
pub struct MemoryProcessRepository {
    records: Vec<ProcessRecord>,
}

impl MemoryProcessRepository {
    /// Builds a repository over a fixed set of records.
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ProcessRepository for MemoryProcessRepository {
    async fn load_catalog(&self) -> RepoResult<SectionedCatalog> {
        Ok(partition_records(self.records.clone()))
    }

    async fn find_first_match(&self, query: &str) -> RepoResult<Option<ProcessMatch>> {
        let needle = query.to_lowercase();
        let found = self
            .records
            .iter()
            .filter(|record| {
                record.title.to_lowercase().contains(&needle)
                    || record.content.to_lowercase().contains(&needle)
            })
            .min_by(|a, b| a.title.cmp(&b.title).then_with(|| a.content.cmp(&b.content)))
            .cloned()
            .map(ProcessMatch::from);
        Ok(found)
    }
}
