//! Connection bootstrap for the external process record store.
//!
//! # Responsibility
//! - Translate [`StoreConfig`] into PostgreSQL connection options.
//! - Open one plain connection per operation, bounded by a connect timeout.
//! - Release connections gracefully without masking query outcomes.
//!
//! # Invariants
//! - No connection pooling: every data access operation opens and closes its
//!   own connection.
//! - Connection establishment never blocks longer than [`CONNECT_TIMEOUT`].
//! - A close failure is logged and swallowed; the operation result wins.
//!
//! # See also
//! - docs/architecture/data-access.md

use crate::config::StoreConfig;
use log::{error, info, warn};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Upper bound on connection establishment.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to establish a usable connection to the record store.
///
/// This is the `ConnectionError` kind of the data access contract: bad
/// credentials, unreachable host, store down, or the connect bound expiring.
#[derive(Debug)]
pub enum StoreError {
    /// The driver rejected or failed the connection attempt.
    Connect(sqlx::Error),
    /// The connection attempt did not complete within the bound.
    ConnectTimeout(Duration),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "failed to connect to process store: {err}"),
            Self::ConnectTimeout(bound) => write!(
                f,
                "connecting to process store timed out after {}ms",
                bound.as_millis()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) => Some(err),
            Self::ConnectTimeout(_) => None,
        }
    }
}

/// Builds driver options from the startup configuration.
pub(crate) fn connect_options(config: &StoreConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password)
        .application_name("opsdesk")
}

/// Opens one connection to the record store.
///
/// # Side effects
/// - Emits `store_connect` logging events with duration and status.
pub(crate) async fn connect(options: &PgConnectOptions) -> StoreResult<PgConnection> {
    let started_at = Instant::now();
    info!("event=store_connect module=store status=start");

    match tokio::time::timeout(CONNECT_TIMEOUT, options.connect()).await {
        Ok(Ok(conn)) => {
            info!(
                "event=store_connect module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Ok(Err(err)) => {
            error!(
                "event=store_connect module=store status=error duration_ms={} error_code=store_connect_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(StoreError::Connect(err))
        }
        Err(_) => {
            error!(
                "event=store_connect module=store status=error duration_ms={} error_code=store_connect_timeout",
                started_at.elapsed().as_millis()
            );
            Err(StoreError::ConnectTimeout(CONNECT_TIMEOUT))
        }
    }
}

/// Releases a connection after an operation, success or failure.
///
/// Dropping a connection also releases it; the explicit close surfaces
/// close failures to the operator log.
pub(crate) async fn close(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        warn!("event=store_close module=store status=error error={err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{connect_options, StoreError, CONNECT_TIMEOUT};
    use crate::config::StoreConfig;

    fn sample_config() -> StoreConfig {
        StoreConfig {
            host: "db.internal".to_string(),
            port: 6432,
            database: "ops".to_string(),
            user: "reader".to_string(),
            password: "s3cret".to_string(),
        }
    }

    #[test]
    fn options_carry_endpoint_fields() {
        let options = connect_options(&sample_config());
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_database(), Some("ops"));
        assert_eq!(options.get_username(), "reader");
    }

    #[test]
    fn timeout_error_names_the_bound() {
        let rendered = StoreError::ConnectTimeout(CONNECT_TIMEOUT).to_string();
        assert!(rendered.contains("10000ms"));
    }
}
