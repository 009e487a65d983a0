//! Application state for the TUI
//!
//! One scan may be in flight at a time. A submitted scan runs as a tokio
//! task and reports back over a channel that [`App::tick`] polls, so the
//! event loop keeps drawing while the database and the file system work.

use std::path::PathBuf;
use std::sync::mpsc;

use batchscan::export::CsvExporter;
use batchscan::scan::{self, ScanError, ScanMode, ScanReport};
use batchscan_db::{AssemblyDb, AssemblyRecord};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Rows moved by PageUp/PageDown
const PAGE_ROWS: usize = 10;

const READY_STATUS: &str = "Ready to scan";

type ScanMessage = Result<ScanReport, ScanError>;

/// Severity of a popup message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Warning,
    Error,
}

/// Modal message shown over the form until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub kind: PopupKind,
    pub title: String,
    pub message: String,
}

/// Summary fields for the batch on display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub batch_code: String,
    pub po_num: String,
    pub count: usize,
}

pub struct App {
    /// Cleared to leave the event loop
    pub running: bool,
    pub mode: ScanMode,
    pub input: String,
    pub summary: Option<BatchSummary>,
    pub records: Vec<AssemblyRecord>,
    /// Highlighted table row
    pub selected: usize,
    pub status: String,
    pub popup: Option<Popup>,
    /// CSV written by the last successful scan
    pub last_export: Option<PathBuf>,
    db: AssemblyDb,
    exporter: CsvExporter,
    pending_scan: Option<mpsc::Receiver<ScanMessage>>,
    /// Value taken from the input by the in-flight scan
    submitted_input: String,
}

impl App {
    pub fn new(db: AssemblyDb, exporter: CsvExporter) -> Self {
        Self {
            running: true,
            mode: ScanMode::default(),
            input: String::new(),
            summary: None,
            records: Vec::new(),
            selected: 0,
            status: READY_STATUS.to_string(),
            popup: None,
            last_export: None,
            db,
            exporter,
            pending_scan: None,
            submitted_input: String::new(),
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.pending_scan.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.running = false;
            return;
        }

        if self.popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.popup = None;
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_mode(),
            KeyCode::Esc => self.input.clear(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) if !ctrl => self.input.push(ch),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.select(self.selected.saturating_add(1)),
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(PAGE_ROWS),
            KeyCode::PageDown => self.select(self.selected.saturating_add(PAGE_ROWS)),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
    }

    /// Switch between serial and batch lookup. Displayed results stay.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.input.clear();
    }

    /// Start a scan for the current input.
    pub fn submit(&mut self) {
        if self.is_scanning() {
            self.status = "Scan in progress, please wait".to_string();
            return;
        }

        let value = match scan::validate_input(self.mode, &self.input) {
            Ok(value) => value.to_string(),
            Err(err) => {
                self.show_popup(PopupKind::Warning, "Input Required", err.to_string());
                return;
            }
        };

        // the next scan starts typing into an empty field
        self.submitted_input = std::mem::take(&mut self.input);
        let (tx, rx) = mpsc::sync_channel::<ScanMessage>(1);
        self.pending_scan = Some(rx);
        self.status = format!("Looking up {} '{}'...", self.mode.label(), value);

        let db = self.db.clone();
        let exporter = self.exporter.clone();
        let mode = self.mode;
        tokio::spawn(async move {
            let result = scan::run_scan(&db, &exporter, mode, &value).await;
            let _ = tx.send(result);
        });
    }

    /// Poll the in-flight scan.
    pub fn tick(&mut self) {
        let Some(rx) = self.pending_scan.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending_scan = None;
                self.apply_scan_result(result);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.pending_scan = None;
                self.restore_submitted_input();
                self.status = "Error occurred during scan".to_string();
                self.show_popup(PopupKind::Error, "Error", "Scan task ended unexpectedly");
            }
        }
    }

    fn apply_scan_result(&mut self, result: ScanMessage) {
        match result {
            Ok(report) => {
                let status = report.status_line();
                let listing = report.listing;
                self.summary = Some(BatchSummary {
                    batch_code: listing.info.batch_code.clone(),
                    po_num: listing.info.po_num.clone(),
                    count: listing.records.len(),
                });
                self.records = listing.records;
                self.selected = 0;
                self.status = status;

                self.submitted_input.clear();

                match report.export {
                    Ok(path) => self.last_export = Some(path),
                    Err(err) => {
                        self.last_export = None;
                        self.show_popup(PopupKind::Error, "Export Error", err.to_string());
                    }
                }
            }
            Err(err @ ScanError::Validation(_)) => {
                self.restore_submitted_input();
                self.show_popup(PopupKind::Warning, "Input Required", err.to_string());
            }
            Err(err @ ScanError::NotFound { .. }) => {
                self.restore_submitted_input();
                let message = err.to_string();
                self.status = message.trim_end_matches('.').to_string();
                self.show_popup(PopupKind::Warning, "Not Found", message);
            }
            Err(err @ ScanError::Connection(_)) => {
                warn!(error = %err, "Scan failed");
                self.restore_submitted_input();
                self.status = "Database connection failed".to_string();
                self.show_popup(PopupKind::Error, "Database Error", err.to_string());
            }
            Err(err @ ScanError::Query(_)) => {
                warn!(error = %err, "Scan failed");
                self.restore_submitted_input();
                self.status = "Error occurred during scan".to_string();
                self.show_popup(PopupKind::Error, "Error", err.to_string());
            }
        }
    }

    /// Put a failed value back for correction unless the user already
    /// started typing the next one.
    fn restore_submitted_input(&mut self) {
        let submitted = std::mem::take(&mut self.submitted_input);
        if self.input.is_empty() {
            self.input = submitted;
        }
    }

    fn select(&mut self, row: usize) {
        self.selected = row.min(self.records.len().saturating_sub(1));
    }

    fn show_popup(&mut self, kind: PopupKind, title: &str, message: impl Into<String>) {
        self.popup = Some(Popup {
            kind,
            title: title.to_string(),
            message: message.into(),
        });
    }
}
