//! Assembly table queries.

use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

use crate::error::{DbError, Result};
use crate::types::{AssemblyRecord, BatchInfo};
use crate::AssemblyDb;

impl AssemblyDb {
    /// Batch code and PO number recorded for a serial number.
    pub async fn lookup_by_serial(&self, serial: &str) -> Result<Option<BatchInfo>> {
        let sql = format!(
            "SELECT batch_code, po_num FROM {} WHERE serial_num = ?",
            self.config().table()
        );

        let mut conn = self.connect().await?;
        let result = sqlx::query(&sql).bind(serial).fetch_optional(&mut conn).await;
        self.release(conn).await;

        let info = result
            .map_err(DbError::Query)?
            .map(|row| row_to_batch_info(&row))
            .transpose()?;

        debug!(serial, found = info.is_some(), "Serial lookup");
        Ok(info)
    }

    /// Batch code and PO number for a batch, taken from one of its rows.
    ///
    /// When rows of the batch disagree on the PO number, the row with the
    /// lowest serial number wins.
    pub async fn lookup_by_batch(&self, batch_code: &str) -> Result<Option<BatchInfo>> {
        let sql = format!(
            "SELECT batch_code, po_num FROM {} WHERE batch_code = ? ORDER BY serial_num LIMIT 1",
            self.config().table()
        );

        let mut conn = self.connect().await?;
        let result = sqlx::query(&sql)
            .bind(batch_code)
            .fetch_optional(&mut conn)
            .await;
        self.release(conn).await;

        let info = result
            .map_err(DbError::Query)?
            .map(|row| row_to_batch_info(&row))
            .transpose()?;

        debug!(batch_code, found = info.is_some(), "Batch lookup");
        Ok(info)
    }

    /// Every unit in a batch, ascending by serial number.
    pub async fn list_serials_in_batch(&self, batch_code: &str) -> Result<Vec<AssemblyRecord>> {
        let sql = format!(
            "SELECT serial_num, batch_code, po_num FROM {} WHERE batch_code = ? ORDER BY serial_num",
            self.config().table()
        );

        let mut conn = self.connect().await?;
        let result = sqlx::query(&sql).bind(batch_code).fetch_all(&mut conn).await;
        self.release(conn).await;

        let records = result
            .map_err(DbError::Query)?
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>>>()?;

        debug!(batch_code, rows = records.len(), "Batch listing");
        Ok(records)
    }
}

fn row_to_batch_info(row: &AnyRow) -> Result<BatchInfo> {
    Ok(BatchInfo {
        batch_code: text_column(row, "batch_code")?,
        po_num: text_column(row, "po_num")?,
    })
}

fn row_to_record(row: &AnyRow) -> Result<AssemblyRecord> {
    Ok(AssemblyRecord {
        serial_num: text_column(row, "serial_num")?,
        batch_code: text_column(row, "batch_code")?,
        po_num: text_column(row, "po_num")?,
    })
}

/// NULL reads as an empty string.
fn text_column(row: &AnyRow, name: &str) -> Result<String> {
    let value: Option<String> = row.try_get(name).map_err(DbError::Query)?;
    Ok(value.unwrap_or_default())
}
