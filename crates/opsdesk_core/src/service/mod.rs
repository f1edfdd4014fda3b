//! Service layer: the API surface the presentation layer calls.
//!
//! # Responsibility
//! - Turn repository outcomes into values a UI can render directly.
//! - Keep failure handling here; callers never see a repository error.
//!
//! # See also
//! - docs/architecture/lookup-flow.md

pub mod catalog_service;
pub mod lookup_service;
