//! Process document domain model.
//!
//! # Responsibility
//! - Define the canonical record read from the operational process store.
//! - Define the reduced projection returned by first-match lookups.
//!
//! # Invariants
//! - `section`, `title` and `content` are always present as stored; the
//!   store columns are non-null text.
//! - Titles carry no uniqueness guarantee; duplicate titles are legal.
//!
//! # See also
//! - docs/architecture/data-access.md

use serde::{Deserialize, Serialize};

/// One operational process document as stored in the record store.
///
/// Records are transient: they are rebuilt from the store on every load and
/// never mutated or cached in-process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Grouping key used to bucket records into catalog sections. Not unique.
    pub section: String,
    /// Short label, searched and displayed.
    pub title: String,
    /// Body text, searched and displayed.
    pub content: String,
}

impl ProcessRecord {
    /// Creates a record from its three text fields.
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// The `{title, content}` projection returned by first-match lookup.
///
/// The match query intentionally does not select `section`; callers render
/// the hit as a title/content pair only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMatch {
    /// Title of the matched record.
    pub title: String,
    /// Full body of the matched record.
    pub content: String,
}

impl From<ProcessRecord> for ProcessMatch {
    fn from(record: ProcessRecord) -> Self {
        Self {
            title: record.title,
            content: record.content,
        }
    }
}
