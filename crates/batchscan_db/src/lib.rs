//! Data access for Batch Scanner.
//!
//! Read-only queries against the assembly table. Every operation opens its
//! own connection, runs a single parameterized statement, and closes the
//! connection again before returning, whether or not the statement succeeded.
//!
//! # Usage
//!
//! ```rust,ignore
//! use batchscan_db::{AssemblyDb, DbConfig};
//!
//! let db = AssemblyDb::new(DbConfig::mysql("db.local", 3306, "reader", "secret", "plant")?);
//!
//! if let Some(info) = db.lookup_by_serial("SN1001").await? {
//!     let records = db.list_serials_in_batch(&info.batch_code).await?;
//! }
//! ```

mod assembly;
mod config;
mod error;
mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use config::{DbConfig, StoreKind, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MYSQL_PORT, DEFAULT_TABLE};
pub use error::{DbError, Result};
pub use types::{AssemblyRecord, BatchInfo};

use sqlx::{AnyConnection, Connection};
use tracing::{debug, info};

/// Handle to the assembly store.
///
/// Holds configuration only; connections are opened per operation.
#[derive(Debug, Clone)]
pub struct AssemblyDb {
    config: DbConfig,
}

impl AssemblyDb {
    pub fn new(config: DbConfig) -> Self {
        sqlx::any::install_default_drivers();
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Open a connection and run a trivial statement.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("SELECT 1").execute(&mut conn).await;
        self.release(conn).await;
        result.map_err(DbError::Query)?;

        info!(url = %self.config.redacted_url(), "Database reachable");
        Ok(())
    }

    async fn connect(&self) -> Result<AnyConnection> {
        let timeout = self.config.connect_timeout();
        match tokio::time::timeout(timeout, AnyConnection::connect(self.config.url())).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(err)) => Err(DbError::Connection(err)),
            Err(_) => Err(DbError::ConnectTimeout(timeout.as_secs())),
        }
    }

    async fn release(&self, conn: AnyConnection) {
        if let Err(err) = conn.close().await {
            debug!(error = %err, "Closing database connection failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ping_seeded_store() {
        let tmp = TempDir::new().unwrap();
        let config = fixture::create_example_store(&tmp.path().join("assembly.db"))
            .await
            .unwrap();

        AssemblyDb::new(config).ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_missing_file_is_connection_error() {
        let tmp = TempDir::new().unwrap();
        let db = AssemblyDb::new(DbConfig::sqlite(tmp.path().join("missing.db")));

        let err = db.ping().await.unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err:?}");
    }
}
