//! CSV export of a batch listing.
//!
//! Files are named `batch_<batch_code>_<YYYYMMDD_HHMMSS>.csv` and written to
//! the configured export directory, the user's download directory, or the
//! current working directory, in that order of preference.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use batchscan_db::AssemblyRecord;
use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info};

/// Header row, in column order.
pub const CSV_HEADER: [&str; 3] = ["Serial Number", "Batch Code", "PO Number"];

/// Export failures. These never undo a lookup that already succeeded.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes batch listings to CSV files.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    preferred_dir: Option<PathBuf>,
}

impl CsvExporter {
    /// Exporter writing to `dir` when it exists; `None` means the download
    /// directory.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { preferred_dir: dir }
    }

    /// Directory the next export will be written to.
    pub fn target_dir(&self) -> PathBuf {
        let preferred = self.preferred_dir.clone().or_else(default_download_dir);
        resolve_export_dir(preferred.as_deref())
    }

    /// Export `records` for `batch_code`, stamped with the current local time.
    pub fn export(&self, records: &[AssemblyRecord], batch_code: &str) -> Result<PathBuf, ExportError> {
        self.export_at(records, batch_code, Local::now())
    }

    /// Export with an explicit timestamp.
    pub fn export_at(
        &self,
        records: &[AssemblyRecord],
        batch_code: &str,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.target_dir().join(export_filename(batch_code, &timestamp));
        write_csv(&path, records)?;

        info!(path = %path.display(), rows = records.len(), "CSV exported");
        Ok(path)
    }
}

/// Export to the download directory (or the working directory).
pub fn export_to_csv(records: &[AssemblyRecord], batch_code: &str) -> Result<PathBuf, ExportError> {
    CsvExporter::default().export(records, batch_code)
}

/// `batch_<batch_code>_<YYYYMMDD_HHMMSS>.csv`
///
/// Characters that cannot appear in a file name are replaced with `_`.
pub fn export_filename(batch_code: &str, timestamp: &DateTime<Local>) -> String {
    format!(
        "batch_{}_{}.csv",
        sanitize_file_component(batch_code),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// The platform download directory, or `~/Downloads`.
pub fn default_download_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}

/// `preferred` if it is an existing directory, else the working directory.
pub fn resolve_export_dir(preferred: Option<&Path>) -> PathBuf {
    match preferred {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        _ => {
            if let Some(dir) = preferred {
                debug!(dir = %dir.display(), "Export directory missing, using working directory");
            }
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

/// Write the header and one row per record, in the given order.
pub fn write_csv(path: &Path, records: &[AssemblyRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for record in records {
        writer
            .write_record([&record.serial_num, &record.batch_code, &record.po_num])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn sanitize_file_component(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect()
}
