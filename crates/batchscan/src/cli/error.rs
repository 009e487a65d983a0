//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;

use batchscan::export::ExportError;
use batchscan::scan::{ScanError, ScanMode};
use batchscan::settings::SettingsError;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    /// Settings could not be loaded or turned into a connection config
    pub fn settings(err: &SettingsError) -> Self {
        let base = Self::new(err.to_string()).with_context("While loading Batch Scanner settings");
        match err {
            SettingsError::Parse { path, .. } => base.with_suggestions([
                format!("TRY: Check the TOML syntax in {}", path.display()),
                "TRY: Show the resolved settings: batchscan config".to_string(),
            ]),
            SettingsError::Read { path, .. } => base.with_suggestions([
                format!("TRY: Check that the file exists: ls -la {}", path.display()),
                "TRY: Omit --config to use ~/.batchscan/config.toml".to_string(),
            ]),
            SettingsError::InvalidEnv { name, .. } => {
                base.with_suggestion(format!("TRY: Fix or unset {}", name))
            }
            SettingsError::Database(_) => base.with_suggestions([
                "TRY: database.url must start with mysql:// or sqlite:".to_string(),
                "TRY: database.table may only contain letters, digits and '_'".to_string(),
            ]),
        }
    }

    /// A scan stopped before producing a listing
    pub fn scan(err: &ScanError, store: &str) -> Self {
        match err {
            ScanError::Validation(_) => Self::new(err.to_string())
                .with_suggestion("TRY: Pass the value to look up: batchscan lookup SN1001"),
            ScanError::NotFound { mode, value } => {
                let other = match mode {
                    ScanMode::Serial => format!("batchscan lookup --batch {}", value),
                    ScanMode::Batch => format!("batchscan lookup {}", value),
                };
                Self::new(err.to_string())
                    .with_context(format!("No row in {} matched exactly", store))
                    .with_suggestions([
                        "TRY: Check the value for typos or stray characters".to_string(),
                        format!("TRY: Look it up as the other kind: {}", other),
                    ])
            }
            ScanError::Connection(_) => Self::new(err.to_string())
                .with_context(format!("Database: {}", store))
                .with_suggestions([
                    "TRY: Verify host, port and credentials: batchscan config".to_string(),
                    "TRY: Test connectivity: batchscan check".to_string(),
                ]),
            ScanError::Query(_) => Self::new(err.to_string())
                .with_context(format!("Database: {}", store))
                .with_suggestion("TRY: Confirm the configured table exists and has serial_num, batch_code, po_num"),
        }
    }

    /// The listing was produced but the CSV file could not be written
    pub fn export(err: &ExportError) -> Self {
        Self::new(err.to_string())
            .with_context("The lookup succeeded; only the CSV export failed")
            .with_suggestions([
                "TRY: Set export.dir in config.toml to a writable directory",
                "TRY: Or set BATCHSCAN_EXPORT_DIR for this run",
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
