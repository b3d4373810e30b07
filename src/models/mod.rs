mod entry;
mod transaction;

pub use entry::{EntryError, ManualEntry};
pub use transaction::{Direction, TransactionRecord};

#[cfg(test)]
mod tests;
