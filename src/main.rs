mod config;
mod db;
mod extract;
mod import;
mod ledger;
mod models;
mod run;
mod sms;
mod ui;

use anyhow::Result;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("smsledger=warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    let db = db::Database::open(&config.db_path)?;
    let mut ledger = ledger::Ledger::open(db, &config.ledger_key);

    run::as_cli(&args, &mut ledger, &config)
}
