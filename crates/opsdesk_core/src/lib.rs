//! Core domain logic for OpsDesk process lookup.
//! This crate is the single source of truth for lookup and catalog behavior.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::catalog::{partition_records, SectionedCatalog};
pub use model::process::{ProcessMatch, ProcessRecord};
pub use repo::memory::MemoryProcessRepository;
pub use repo::process_repo::{
    PgProcessRepository, ProcessRepository, RepoError, RepoResult, QUERY_TIMEOUT,
};
pub use service::catalog_service::CatalogService;
pub use service::lookup_service::{
    format_match, LookupService, NO_CONNECTION_REPLY, NO_MATCH_REPLY, PROMPT_REPLY,
    QUERY_FAILURE_REPLY,
};
pub use store::{StoreError, StoreResult, CONNECT_TIMEOUT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
