use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::sms::DEFAULT_MAX_COUNT;

/// Environment variable pointing at a database file, overriding the data directory.
pub(crate) const DB_ENV: &str = "SMSLEDGER_DB";

/// Key the ledger is stored under.
pub(crate) const LEDGER_KEY: &str = "expenses";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) ledger_key: String,
    pub(crate) sms_batch: usize,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let db_path = match std::env::var_os(DB_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };
        Ok(Self {
            db_path,
            ledger_key: LEDGER_KEY.to_string(),
            sms_batch: DEFAULT_MAX_COUNT,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "smsledger", "smsledger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("smsledger.db"))
}
