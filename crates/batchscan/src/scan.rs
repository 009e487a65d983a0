//! The scan pipeline: validate input, resolve the batch, list its serials,
//! export the listing.
//!
//! Both the TUI and the `lookup` command drive this module. A lookup that
//! matches nothing stops the scan before any export. An export failure does
//! not fail the scan; it is carried in the report next to the records.

use std::fmt;
use std::path::PathBuf;

use batchscan_db::{AssemblyDb, AssemblyRecord, BatchInfo, DbError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::export::{CsvExporter, ExportError};

/// Which column the scanned value is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Serial,
    Batch,
}

impl ScanMode {
    pub fn toggle(self) -> Self {
        match self {
            ScanMode::Serial => ScanMode::Batch,
            ScanMode::Batch => ScanMode::Serial,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanMode::Serial => "Serial Number",
            ScanMode::Batch => "Batch Code",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ScanMode::Serial => "serial number",
            ScanMode::Batch => "batch code",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a scan stops before producing a listing.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Please enter a {}.", .0.noun())]
    Validation(ScanMode),

    #[error("{} '{value}' not found.", .mode.label())]
    NotFound { mode: ScanMode, value: String },

    #[error("Database connection failed: {0}")]
    Connection(#[source] DbError),

    #[error("Database query failed: {0}")]
    Query(#[source] DbError),
}

impl From<DbError> for ScanError {
    fn from(err: DbError) -> Self {
        if err.is_connection() {
            ScanError::Connection(err)
        } else {
            ScanError::Query(err)
        }
    }
}

/// A resolved batch and its members.
#[derive(Debug, Clone, Serialize)]
pub struct BatchListing {
    pub mode: ScanMode,
    pub input: String,
    pub info: BatchInfo,
    pub records: Vec<AssemblyRecord>,
}

impl BatchListing {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Distinct non-empty PO numbers across the batch, sorted.
    pub fn distinct_po_numbers(&self) -> Vec<&str> {
        let mut pos: Vec<&str> = self
            .records
            .iter()
            .map(|r| r.po_num.as_str())
            .filter(|po| !po.is_empty())
            .collect();
        pos.sort_unstable();
        pos.dedup();
        pos
    }

    /// True when members of the batch disagree on the PO number.
    pub fn has_mixed_po(&self) -> bool {
        self.distinct_po_numbers().len() > 1
    }
}

/// Outcome of a full scan.
#[derive(Debug)]
pub struct ScanReport {
    pub listing: BatchListing,
    pub export: Result<PathBuf, ExportError>,
}

impl ScanReport {
    /// One-line summary for status bars.
    pub fn status_line(&self) -> String {
        let listing = &self.listing;
        let mut line = format!(
            "Found {} serials in batch '{}'",
            listing.count(),
            listing.info.batch_code
        );
        match &self.export {
            Ok(path) => {
                let name = path.file_name().unwrap_or(path.as_os_str());
                line.push_str(&format!(" - CSV saved: {}", name.to_string_lossy()));
            }
            Err(_) => line.push_str(" - CSV export failed"),
        }
        if listing.has_mixed_po() {
            line.push_str(&format!(
                " (batch spans PO numbers: {})",
                listing.distinct_po_numbers().join(", ")
            ));
        }
        line
    }
}

/// Trim the raw input and reject an empty value.
pub fn validate_input(mode: ScanMode, raw: &str) -> Result<&str, ScanError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ScanError::Validation(mode));
    }
    Ok(value)
}

/// Resolve the batch for `raw` and list all of its serial numbers.
pub async fn lookup_batch(db: &AssemblyDb, mode: ScanMode, raw: &str) -> Result<BatchListing, ScanError> {
    let value = validate_input(mode, raw)?;

    let found = match mode {
        ScanMode::Serial => db.lookup_by_serial(value).await?,
        ScanMode::Batch => db.lookup_by_batch(value).await?,
    };
    let Some(info) = found else {
        info!(mode = %mode, value, "No match");
        return Err(ScanError::NotFound {
            mode,
            value: value.to_string(),
        });
    };

    let records = db.list_serials_in_batch(&info.batch_code).await?;
    let listing = BatchListing {
        mode,
        input: value.to_string(),
        info,
        records,
    };

    if listing.has_mixed_po() {
        warn!(
            batch_code = %listing.info.batch_code,
            po_numbers = ?listing.distinct_po_numbers(),
            shown = %listing.info.po_num,
            "Batch spans more than one PO number"
        );
    }

    Ok(listing)
}

/// Look up, list, and export.
pub async fn run_scan(
    db: &AssemblyDb,
    exporter: &CsvExporter,
    mode: ScanMode,
    raw: &str,
) -> Result<ScanReport, ScanError> {
    let listing = lookup_batch(db, mode, raw).await?;
    let export = exporter.export(&listing.records, &listing.info.batch_code);

    match &export {
        Ok(path) => info!(
            mode = %mode,
            value = %listing.input,
            batch_code = %listing.info.batch_code,
            count = listing.count(),
            path = %path.display(),
            "Scan complete"
        ),
        Err(err) => warn!(
            batch_code = %listing.info.batch_code,
            error = %err,
            "Scan listed batch but export failed"
        ),
    }

    Ok(ScanReport { listing, export })
}
