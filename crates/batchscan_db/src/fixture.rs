//! Seeding helpers for tests.
//!
//! Builds a SQLite file with the assembly table layout used in production.

use std::path::Path;

use sqlx::{AnyConnection, Connection};

use crate::config::{DbConfig, DEFAULT_TABLE};
use crate::error::{DbError, Result};
use crate::types::AssemblyRecord;

/// Sample rows: batch B200 has three units, B300 mixes two PO numbers,
/// B500 has a unit without a PO number. Insert order is not serial order.
pub fn example_rows() -> Vec<(&'static str, &'static str, Option<&'static str>)> {
    vec![
        ("SN1005", "B200", Some("PO55")),
        ("SN2002", "B300", Some("PO78")),
        ("SN1001", "B200", Some("PO55")),
        ("SN2001", "B300", Some("PO77")),
        ("SN1002", "B200", Some("PO55")),
        ("SN4001", "B500", None),
    ]
}

/// The B200 batch as the store should return it.
pub fn example_batch_b200() -> Vec<AssemblyRecord> {
    vec![
        AssemblyRecord::new("SN1001", "B200", "PO55"),
        AssemblyRecord::new("SN1002", "B200", "PO55"),
        AssemblyRecord::new("SN1005", "B200", "PO55"),
    ]
}

/// Create a SQLite store at `path` seeded with [`example_rows`].
pub async fn create_example_store(path: &Path) -> Result<DbConfig> {
    create_store(path, &example_rows()).await
}

/// Create a SQLite store at `path` containing `rows`.
///
/// Returns a read-only configuration pointing at the new file.
pub async fn create_store(
    path: &Path,
    rows: &[(&str, &str, Option<&str>)],
) -> Result<DbConfig> {
    sqlx::any::install_default_drivers();

    let url = format!("sqlite:{}?mode=rwc", path.display());
    let mut conn = AnyConnection::connect(&url)
        .await
        .map_err(DbError::Connection)?;

    let create = format!(
        "CREATE TABLE {} (serial_num TEXT PRIMARY KEY, batch_code TEXT NOT NULL, po_num TEXT)",
        DEFAULT_TABLE
    );
    sqlx::query(&create)
        .execute(&mut conn)
        .await
        .map_err(DbError::Query)?;

    let insert = format!(
        "INSERT INTO {} (serial_num, batch_code, po_num) VALUES (?, ?, ?)",
        DEFAULT_TABLE
    );
    for (serial, batch, po) in rows {
        sqlx::query(&insert)
            .bind(*serial)
            .bind(*batch)
            .bind(*po)
            .execute(&mut conn)
            .await
            .map_err(DbError::Query)?;
    }

    conn.close().await.map_err(DbError::Connection)?;
    Ok(DbConfig::sqlite(path))
}
