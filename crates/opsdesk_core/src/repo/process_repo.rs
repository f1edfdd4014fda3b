//! PostgreSQL-backed repository for process records.
//!
//! # Responsibility
//! - Hold the only SQL that touches `public.ops_processes`.
//! - Run each operation on a fresh connection and close it on every path.
//! - Bound every statement with [`QUERY_TIMEOUT`].
//!
//! # Invariants
//! - User text is only ever bound as a parameter, never spliced into SQL.
//! - LIKE wildcards in user text are escaped, so a question is always a
//!   literal substring search.
//! - `Ok(None)` means "no record matched"; it is not an error.
//!
//! # See also
//! - docs/architecture/data-access.md

use crate::config::StoreConfig;
use crate::model::catalog::{partition_records, SectionedCatalog};
use crate::model::process::{ProcessMatch, ProcessRecord};
use crate::store::{self, StoreError};
use async_trait::async_trait;
use log::{error, info};
use sqlx::postgres::PgConnectOptions;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::time::{Duration, Instant};

const CATALOG_SQL: &str = "SELECT section, title, content FROM public.ops_processes";

const FIRST_MATCH_SQL: &str = "SELECT title, content FROM public.ops_processes \
     WHERE title ILIKE $1 OR content ILIKE $1 \
     ORDER BY title ASC, content ASC \
     LIMIT 1";

/// Upper bound on a single read statement.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Convenience alias for repository results.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by the repository layer.
#[derive(Debug)]
pub enum RepoError {
    /// The store could not be reached or the connect attempt timed out.
    Connection(StoreError),
    /// A statement failed after the connection was established.
    Query(sqlx::Error),
    /// A statement did not finish within [`QUERY_TIMEOUT`].
    QueryTimeout(Duration),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::Connection(err) => write!(f, "{err}"),
            RepoError::Query(err) => write!(f, "process query failed: {err}"),
            RepoError::QueryTimeout(bound) => {
                write!(f, "process query timed out after {}ms", bound.as_millis())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RepoError::Connection(err) => Some(err),
            RepoError::Query(err) => Some(err),
            RepoError::QueryTimeout(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        RepoError::Connection(err)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Query(err)
    }
}

/// Read access to the process table.
///
/// Services are generic over this trait so they can run against the
/// PostgreSQL backend in production and [`crate::repo::memory`] in tests.
#[async_trait]
pub trait ProcessRepository {
    /// Loads every record, grouped by section.
    async fn load_catalog(&self) -> RepoResult<SectionedCatalog>;

    /// Finds the first record whose title or content contains `query`,
    /// case-insensitively. Returns `Ok(None)` when nothing matches.
    async fn find_first_match(&self, query: &str) -> RepoResult<Option<ProcessMatch>>;
}

/// PostgreSQL implementation of [`ProcessRepository`].
///
/// Connects per call and closes the connection before returning, on both
/// success and failure paths. There is no pool; each operation is one
/// connect, one statement, one close.
pub struct PgProcessRepository {
    options: PgConnectOptions,
}

impl PgProcessRepository {
    /// Builds a repository from store credentials. No connection is opened
    /// until the first operation runs.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            options: store::connect_options(config),
        }
    }
}

#[async_trait]
impl ProcessRepository for PgProcessRepository {
    async fn load_catalog(&self) -> RepoResult<SectionedCatalog> {
        let started_at = Instant::now();
        info!("event=catalog_load module=repo status=start");

        let mut conn = store::connect(&self.options).await?;
        let outcome = run_bounded(
            sqlx::query_as::<_, ProcessRow>(CATALOG_SQL).fetch_all(&mut conn),
        )
        .await;
        store::close(conn).await;

        match outcome {
            Ok(rows) => {
                info!(
                    "event=catalog_load module=repo status=ok rows={} duration_ms={}",
                    rows.len(),
                    started_at.elapsed().as_millis()
                );
                let records = rows.into_iter().map(ProcessRecord::from).collect();
                Ok(partition_records(records))
            }
            Err(err) => {
                error!(
                    "event=catalog_load module=repo status=error error_code=catalog_load_failed \
                     duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    async fn find_first_match(&self, query: &str) -> RepoResult<Option<ProcessMatch>> {
        let started_at = Instant::now();
        info!(
            "event=first_match module=repo status=start query_chars={}",
            query.chars().count()
        );

        let pattern = build_like_pattern(query);
        let mut conn = store::connect(&self.options).await?;
        let outcome = run_bounded(
            sqlx::query_as::<_, MatchRow>(FIRST_MATCH_SQL)
                .bind(&pattern)
                .fetch_optional(&mut conn),
        )
        .await;
        store::close(conn).await;

        match outcome {
            Ok(row) => {
                info!(
                    "event=first_match module=repo status=ok matched={} duration_ms={}",
                    row.is_some(),
                    started_at.elapsed().as_millis()
                );
                Ok(row.map(ProcessMatch::from))
            }
            Err(err) => {
                error!(
                    "event=first_match module=repo status=error error_code=first_match_failed \
                     duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

/// Row shape for catalog loads.
#[derive(Debug, sqlx::FromRow)]
struct ProcessRow {
    section: String,
    title: String,
    content: String,
}

impl From<ProcessRow> for ProcessRecord {
    fn from(row: ProcessRow) -> Self {
        ProcessRecord {
            section: row.section,
            title: row.title,
            content: row.content,
        }
    }
}

/// Row shape for first-match lookups.
#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    title: String,
    content: String,
}

impl From<MatchRow> for ProcessMatch {
    fn from(row: MatchRow) -> Self {
        ProcessMatch {
            title: row.title,
            content: row.content,
        }
    }
}

/// Awaits a statement future under [`QUERY_TIMEOUT`].
async fn run_bounded<T>(statement: impl Future<Output = Result<T, sqlx::Error>>) -> RepoResult<T> {
    match tokio::time::timeout(QUERY_TIMEOUT, statement).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.into()),
        Err(_) => Err(RepoError::QueryTimeout(QUERY_TIMEOUT)),
    }
}

/// Builds the bound pattern for a literal substring search.
///
/// LIKE wildcards and the escape character in the user text are escaped so
/// the predicate always means "contains this text" and never turns into a
/// wildcard match.
fn build_like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
