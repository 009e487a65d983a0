//! `batchscan check`: verify the database is reachable

use anyhow::Result;
use batchscan::scan::ScanError;
use batchscan::settings::Settings;
use batchscan_db::AssemblyDb;

use super::error::HelpfulError;

pub fn run(settings: &Settings) -> Result<()> {
    let config = settings.db_config().map_err(|e| HelpfulError::settings(&e))?;
    let store = config.redacted_url();
    let db = AssemblyDb::new(config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(db.ping())
        .map_err(|e| HelpfulError::scan(&ScanError::from(e), &store))?;

    println!("OK: {} is reachable", store);
    Ok(())
}
