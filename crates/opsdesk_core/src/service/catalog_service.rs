//! Catalog service for section-grouped browsing.
//!
//! # Responsibility
//! - Hand the presentation layer a sectioned catalog it can render as-is.
//!
//! # Invariants
//! - A store failure degrades to an empty catalog; this call never errors.
//!
//! # See also
//! - docs/architecture/lookup-flow.md

use crate::model::catalog::SectionedCatalog;
use crate::repo::process_repo::ProcessRepository;
use log::error;

/// Fail-soft catalog facade over a process repository.
pub struct CatalogService<R: ProcessRepository> {
    repo: R,
}

impl<R: ProcessRepository> CatalogService<R> {
    /// Creates a service over the given repository backend.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads every record grouped by section.
    ///
    /// On any store failure the error is logged and an empty catalog is
    /// returned, so a page render degrades to "no sections" instead of an
    /// error surface.
    pub async fn catalog(&self) -> SectionedCatalog {
        match self.repo.load_catalog().await {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(
                    "event=catalog_render module=service status=error \
                     error_code=catalog_unavailable error={err}"
                );
                SectionedCatalog::new()
            }
        }
    }
}
