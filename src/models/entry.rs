use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::{Direction, TransactionRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Please fill in all fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("Invalid amount '{0}': expected a non-negative number")]
    InvalidAmount(String),
}

/// A manually entered transaction, before validation.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub amount: String,
    pub description: String,
    pub date: String,
    pub direction: Direction,
}

impl ManualEntry {
    /// New entry dated today (ISO `YYYY-MM-DD`), defaulting to a debit.
    pub fn new(amount: String, description: String) -> Self {
        Self {
            amount,
            description,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            direction: Direction::Debit,
        }
    }

    pub fn into_record(self) -> Result<TransactionRecord, EntryError> {
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(EntryError::MissingField("amount"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(EntryError::MissingField("description"));
        }

        let magnitude = Decimal::from_str(&amount.replace(',', ""))
            .map_err(|_| EntryError::InvalidAmount(amount.to_string()))?;
        if magnitude.is_sign_negative() && !magnitude.is_zero() {
            return Err(EntryError::InvalidAmount(amount.to_string()));
        }

        Ok(TransactionRecord::new(
            self.direction,
            magnitude,
            description.to_string(),
            self.date.trim().to_string(),
        ))
    }
}
