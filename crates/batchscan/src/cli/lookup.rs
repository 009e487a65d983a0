//! `batchscan lookup`: run one scan without the TUI

use std::path::PathBuf;

use anyhow::Result;
use batchscan::export::{CsvExporter, ExportError};
use batchscan::scan::{self, BatchListing, ScanMode};
use batchscan::settings::Settings;
use batchscan_db::AssemblyDb;
use serde::Serialize;

use super::error::HelpfulError;
use super::output::{format_number, print_records};

/// Arguments for the lookup command
#[derive(Debug, clap::Args)]
pub struct LookupArgs {
    /// Serial number (or batch code with --batch)
    pub value: String,

    /// Treat the value as a batch code
    #[arg(short, long)]
    pub batch: bool,

    /// Skip writing the CSV file
    #[arg(long)]
    pub no_export: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    #[serde(flatten)]
    listing: &'a BatchListing,
    count: usize,
    csv_path: Option<String>,
}

fn json_output<'a>(
    listing: &'a BatchListing,
    export: Option<&Result<PathBuf, ExportError>>,
) -> LookupOutput<'a> {
    LookupOutput {
        listing,
        count: listing.count(),
        csv_path: export
            .and_then(|r| r.as_ref().ok())
            .map(|p| p.display().to_string()),
    }
}

pub fn run(args: LookupArgs, settings: &Settings) -> Result<()> {
    let config = settings.db_config().map_err(|e| HelpfulError::settings(&e))?;
    let store = config.redacted_url();
    let db = AssemblyDb::new(config);
    let exporter = CsvExporter::new(settings.export.dir.clone());
    let mode = if args.batch { ScanMode::Batch } else { ScanMode::Serial };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let listing = rt
        .block_on(scan::lookup_batch(&db, mode, &args.value))
        .map_err(|e| HelpfulError::scan(&e, &store))?;

    let export = if args.no_export {
        None
    } else {
        Some(exporter.export(&listing.records, &listing.info.batch_code))
    };

    if args.json {
        let output = json_output(&listing, export.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Batch Code:           {}", listing.info.batch_code);
        println!("PO Number:            {}", listing.info.po_num);
        println!("Total Serial Numbers: {}", format_number(listing.count()));
        if listing.has_mixed_po() {
            println!(
                "WARNING: batch spans PO numbers {}",
                listing.distinct_po_numbers().join(", ")
            );
        }
        println!();
        print_records(&listing.records);
        if let Some(Ok(path)) = &export {
            println!();
            println!("CSV saved: {}", path.display());
        }
    }

    match export {
        Some(Err(err)) => Err(HelpfulError::export(&err).into()),
        _ => Ok(()),
    }
}
