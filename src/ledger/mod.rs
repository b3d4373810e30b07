mod aggregate;

use anyhow::{Context, Result};

use crate::models::TransactionRecord;

pub(crate) use aggregate::{format_amount, Summary};

/// Persistence boundary: a flat list of records under a named key.
pub(crate) trait LedgerStore {
    fn load(&self, key: &str) -> Result<Option<Vec<TransactionRecord>>>;

    /// Re-read the list under `key`, apply `change` and write the result back
    /// as one atomic step. Returns `change`'s output and the list as written.
    fn update<T, F>(&mut self, key: &str, change: F) -> Result<(T, Vec<TransactionRecord>)>
    where
        F: FnOnce(&mut Vec<TransactionRecord>) -> T;
}

/// The in-memory ledger and the store it is persisted to.
///
/// Every change is applied by the store to the list as currently stored, not
/// to the copy loaded at open, so two handles on one store never drop each
/// other's writes. `records` is refreshed from what was written.
pub(crate) struct Ledger<S: LedgerStore> {
    store: S,
    key: String,
    records: Vec<TransactionRecord>,
}

impl<S: LedgerStore> Ledger<S> {
    /// Load the ledger stored under `key`. Missing or unreadable data gives an
    /// empty ledger rather than an error.
    pub(crate) fn open(store: S, key: &str) -> Self {
        let records = match store.load(key) {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Stored ledger '{key}' could not be read, starting empty: {e:#}");
                Vec::new()
            }
        };
        log::debug!("Opened ledger '{key}' with {} records", records.len());
        Self {
            store,
            key: key.to_string(),
            records,
        }
    }

    pub(crate) fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary::of(&self.records)
    }

    pub(crate) fn add(&mut self, record: TransactionRecord) -> Result<()> {
        self.extend(vec![record])?;
        Ok(())
    }

    /// Append `new` in order. Duplicates are kept. Returns how many were added.
    pub(crate) fn extend(&mut self, new: Vec<TransactionRecord>) -> Result<usize> {
        if new.is_empty() {
            return Ok(0);
        }
        let added = new.len();
        self.apply(|records| records.extend(new))?;
        Ok(added)
    }

    /// Remove the record at `index` of the stored list. `None` when the index
    /// is out of range.
    pub(crate) fn remove(&mut self, index: usize) -> Result<Option<TransactionRecord>> {
        self.apply(|records| (index < records.len()).then(|| records.remove(index)))
    }

    /// Run `change` through the store and only then take the written list, so
    /// a failed save leaves the in-memory ledger as it was.
    fn apply<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<TransactionRecord>) -> T,
    {
        let (out, written) = self
            .store
            .update(&self.key, change)
            .with_context(|| format!("Failed to save ledger '{}'", self.key))?;
        self.records = written;
        Ok(out)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
