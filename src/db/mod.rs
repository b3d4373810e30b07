mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

use crate::ledger::LedgerStore;
use crate::models::TransactionRecord;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        // Another process may hold the write lock mid-update
        conn.busy_timeout(Duration::from_secs(5))
            .context("Failed to set busy timeout")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Key-value ─────────────────────────────────────────────

    pub(crate) fn get_value(&self, key: &str) -> Result<Option<String>> {
        read_value(&self.conn, key)
    }

    #[cfg(test)]
    pub(crate) fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_value(&tx, key, value)?;
        tx.commit()?;
        Ok(())
    }
}

fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?)
}

fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, chrono::Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

fn decode_records(key: &str, raw: &str) -> Result<Vec<TransactionRecord>> {
    serde_json::from_str(raw).with_context(|| format!("Malformed ledger data under '{key}'"))
}

impl LedgerStore for Database {
    fn load(&self, key: &str) -> Result<Option<Vec<TransactionRecord>>> {
        self.get_value(key)?
            .map(|raw| decode_records(key, &raw))
            .transpose()
    }

    /// Read-modify-write under `BEGIN IMMEDIATE`: the write lock is taken
    /// before the read, so concurrent updates from other connections queue
    /// up behind it instead of overwriting each other.
    fn update<T, F>(&mut self, key: &str, change: F) -> Result<(T, Vec<TransactionRecord>)>
    where
        F: FnOnce(&mut Vec<TransactionRecord>) -> T,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to lock ledger for update")?;

        let mut records = match read_value(&tx, key)? {
            Some(raw) => decode_records(key, &raw).unwrap_or_else(|e| {
                log::warn!("Replacing unreadable ledger data: {e:#}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        let out = change(&mut records);

        let raw = serde_json::to_string(&records).context("Failed to serialize ledger")?;
        write_value(&tx, key, &raw)?;
        tx.commit()?;
        Ok((out, records))
    }
}
