//! `batchscan config`: show resolved settings and paths

use std::path::PathBuf;

use anyhow::Result;
use batchscan::export::CsvExporter;
use batchscan::settings::Settings;
use batchscan_db::DbConfig;

use super::error::HelpfulError;

/// Arguments for the config command
#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show resolved settings in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Everything the config command reports
struct ConfigReport {
    /// Loaded file, or the default location when defaults apply
    config_path: Option<PathBuf>,
    loaded: bool,
    db: DbConfig,
    export_configured: Option<PathBuf>,
    export_dir: PathBuf,
    logs: Option<PathBuf>,
}

impl ConfigReport {
    fn resolve(settings: &Settings) -> Result<Self> {
        let db = settings.db_config().map_err(|e| HelpfulError::settings(&e))?;
        let exporter = CsvExporter::new(settings.export.dir.clone());
        Ok(Self {
            config_path: settings.source.clone().or_else(Settings::default_path),
            loaded: settings.source.is_some(),
            db,
            export_configured: settings.export.dir.clone(),
            export_dir: exporter.target_dir(),
            logs: batchscan_logging::logs_dir().ok(),
        })
    }

    fn to_json(&self) -> serde_json::Value {
        let lossy = |p: &PathBuf| p.to_string_lossy().to_string();
        serde_json::json!({
            "config_file": self.config_path.as_ref().map(lossy),
            "config_loaded": self.loaded,
            "database": {
                "kind": self.db.kind().as_str(),
                "url": self.db.redacted_url(),
                "table": self.db.table(),
                "connect_timeout_secs": self.db.connect_timeout().as_secs(),
            },
            "export": {
                "configured": self.export_configured.as_ref().map(lossy),
                "resolved": lossy(&self.export_dir),
            },
            "logs": self.logs.as_ref().map(lossy),
        })
    }
}

/// Run the config command
pub fn run(args: ConfigArgs, settings: &Settings) -> Result<()> {
    let report = ConfigReport::resolve(settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        return Ok(());
    }

    println!("BATCH SCANNER CONFIGURATION");
    println!("===========================");
    println!();
    match &report.config_path {
        Some(path) if report.loaded => println!("Config:   {} (loaded)", path.display()),
        Some(path) => println!("Config:   {} (not found, using defaults)", path.display()),
        None => println!("Config:   (no home directory, using defaults)"),
    }
    println!();
    println!("Database: {}", report.db.redacted_url());
    println!("  Kind:   {}", report.db.kind());
    println!("  Table:  {}", report.db.table());
    println!("  Timeout: {}s", report.db.connect_timeout().as_secs());
    println!();
    println!("Export:   {}", report.export_dir.display());
    if let Some(dir) = &report.export_configured {
        if !dir.is_dir() {
            println!("          (configured {} does not exist)", dir.display());
        }
    }
    if let Some(logs) = &report.logs {
        println!();
        println!("Logs:     {}", logs.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_shows_explicit_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plant.toml");
        std::fs::write(
            &path,
            format!(
                "[database]\nuser = \"testing\"\npassword = \"secret\"\n\n[export]\ndir = \"{}\"\n",
                tmp.path().display()
            ),
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();

        let json = ConfigReport::resolve(&settings).unwrap().to_json();

        assert_eq!(json["config_file"], path.to_string_lossy().to_string());
        assert_eq!(json["config_loaded"], true);
        assert_eq!(json["database"]["kind"], "mysql");
        assert_eq!(json["database"]["table"], "faceware_assembly1");
        assert_eq!(json["export"]["resolved"], tmp.path().to_string_lossy().to_string());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn test_report_defaults_point_at_default_location() {
        let json = ConfigReport::resolve(&Settings::default()).unwrap().to_json();

        assert_eq!(json["config_loaded"], false);
        let expected = Settings::default_path().map(|p| p.to_string_lossy().to_string());
        assert_eq!(json["config_file"].as_str().map(str::to_string), expected);
    }

    #[test]
    fn test_run_rejects_invalid_table() {
        let mut settings = Settings::default();
        settings.database.table = "bad table".to_string();

        let err = run(ConfigArgs { json: true }, &settings).unwrap_err();
        assert!(err.to_string().contains("table name"));
    }
}
