//! End-to-end scan pipeline against a seeded SQLite store.

use batchscan::export::CsvExporter;
use batchscan::scan::{lookup_batch, run_scan, ScanError, ScanMode};
use batchscan_db::{fixture, AssemblyDb, DbConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

async fn seeded(dir: &TempDir) -> AssemblyDb {
    let config = fixture::create_example_store(&dir.path().join("assembly.db"))
        .await
        .unwrap();
    AssemblyDb::new(config)
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn serial_scan_lists_and_exports_whole_batch() {
    let db_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let db = seeded(&db_dir).await;
    let exporter = CsvExporter::new(Some(out_dir.path().to_path_buf()));

    let report = run_scan(&db, &exporter, ScanMode::Serial, "  SN1001 \n").await.unwrap();

    assert_eq!(report.listing.info.batch_code, "B200");
    assert_eq!(report.listing.info.po_num, "PO55");
    assert_eq!(report.listing.records, fixture::example_batch_b200());
    assert_eq!(report.listing.count(), 3);

    let path = report.export.as_ref().unwrap();
    assert_eq!(path.parent().unwrap(), out_dir.path());
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("batch_B200_"));
    assert!(name.ends_with(".csv"));
    // batch_B200_YYYYMMDD_HHMMSS.csv
    assert_eq!(name.len(), "batch_B200_".len() + 15 + ".csv".len());

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Serial Number,Batch Code,PO Number",
            "SN1001,B200,PO55",
            "SN1002,B200,PO55",
            "SN1005,B200,PO55",
        ]
    );
    assert!(report.status_line().starts_with("Found 3 serials in batch 'B200'"));
}

#[tokio::test]
async fn batch_scan_uses_batch_code_directly() {
    let db_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let db = seeded(&db_dir).await;
    let exporter = CsvExporter::new(Some(out_dir.path().to_path_buf()));

    let report = run_scan(&db, &exporter, ScanMode::Batch, "B200").await.unwrap();

    assert_eq!(report.listing.mode, ScanMode::Batch);
    assert_eq!(report.listing.records, fixture::example_batch_b200());
    assert_eq!(csv_files(out_dir.path()).len(), 1);
}

#[tokio::test]
async fn unknown_serial_is_not_found_and_writes_nothing() {
    let db_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let db = seeded(&db_dir).await;
    let exporter = CsvExporter::new(Some(out_dir.path().to_path_buf()));

    let err = run_scan(&db, &exporter, ScanMode::Serial, "SN9999").await.unwrap_err();

    match &err {
        ScanError::NotFound { mode, value } => {
            assert_eq!(*mode, ScanMode::Serial);
            assert_eq!(value, "SN9999");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Serial Number 'SN9999' not found.");
    assert!(csv_files(out_dir.path()).is_empty());
}

#[tokio::test]
async fn empty_input_is_rejected_before_connecting() {
    let out_dir = TempDir::new().unwrap();
    // store does not exist; validation must fail first
    let db = AssemblyDb::new(DbConfig::sqlite("/nonexistent/dir/assembly.db"));
    let exporter = CsvExporter::new(Some(out_dir.path().to_path_buf()));

    let err = run_scan(&db, &exporter, ScanMode::Batch, "   ").await.unwrap_err();

    assert!(matches!(err, ScanError::Validation(ScanMode::Batch)));
    assert_eq!(err.to_string(), "Please enter a batch code.");
    assert!(csv_files(out_dir.path()).is_empty());
}

#[tokio::test]
async fn unreachable_store_is_a_connection_error() {
    let out_dir = TempDir::new().unwrap();
    let db = AssemblyDb::new(DbConfig::sqlite("/nonexistent/dir/assembly.db"));
    let exporter = CsvExporter::new(Some(out_dir.path().to_path_buf()));

    let err = run_scan(&db, &exporter, ScanMode::Serial, "SN1001").await.unwrap_err();

    assert!(matches!(err, ScanError::Connection(_)));
    assert!(csv_files(out_dir.path()).is_empty());
}

#[tokio::test]
async fn mixed_po_batch_is_reported() {
    let db_dir = TempDir::new().unwrap();
    let config = fixture::create_store(
        &db_dir.path().join("mixed.db"),
        &[
            ("SN2", "B9", Some("PO2")),
            ("SN1", "B9", Some("PO1")),
            ("SN3", "B9", Some("PO1")),
        ],
    )
    .await
    .unwrap();
    let db = AssemblyDb::new(config);

    let listing = lookup_batch(&db, ScanMode::Batch, "B9").await.unwrap();

    // PO of the lowest serial
    assert_eq!(listing.info.po_num, "PO1");
    assert!(listing.has_mixed_po());
    assert_eq!(listing.distinct_po_numbers(), vec!["PO1", "PO2"]);
    let serials: Vec<&str> = listing.records.iter().map(|r| r.serial_num.as_str()).collect();
    assert_eq!(serials, vec!["SN1", "SN2", "SN3"]);
}
