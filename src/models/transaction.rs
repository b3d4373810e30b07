use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Description given to every record extracted from an SMS body.
pub const SMS_DESCRIPTION: &str = "SMS Transaction";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Apply this direction's sign to a magnitude. The sign of the input is ignored.
    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        let abs = magnitude.abs();
        match self {
            Self::Credit => abs,
            Self::Debit if abs.is_zero() => Decimal::ZERO,
            Self::Debit => -abs,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ledger entry.
///
/// The signed `amount` and the `is_credit` flag encode the same fact twice, so
/// the fields are private and every constructor derives the sign from a
/// [`Direction`]. Records read back from storage go through the same path,
/// with `isCredit` taking precedence over whatever sign was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct TransactionRecord {
    amount: Decimal,
    description: String,
    date: String,
    is_credit: bool,
}

impl TransactionRecord {
    pub fn new(direction: Direction, magnitude: Decimal, description: String, date: String) -> Self {
        Self {
            amount: direction.signed(magnitude),
            description,
            date,
            is_credit: direction.is_credit(),
        }
    }

    pub fn from_sms(direction: Direction, magnitude: Decimal, date: String) -> Self {
        Self::new(direction, magnitude, SMS_DESCRIPTION.to_string(), date)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn is_credit(&self) -> bool {
        self.is_credit
    }

    pub fn direction(&self) -> Direction {
        if self.is_credit {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }
}

/// On-disk shape of a record: `amount`, `description`, `date` and `isCredit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    amount: Decimal,
    description: String,
    date: String,
    #[serde(rename = "isCredit")]
    is_credit: bool,
}

impl From<StoredRecord> for TransactionRecord {
    fn from(raw: StoredRecord) -> Self {
        let direction = if raw.is_credit {
            Direction::Credit
        } else {
            Direction::Debit
        };
        Self::new(direction, raw.amount, raw.description, raw.date)
    }
}

impl From<TransactionRecord> for StoredRecord {
    fn from(record: TransactionRecord) -> Self {
        Self {
            amount: record.amount,
            description: record.description,
            date: record.date,
            is_credit: record.is_credit,
        }
    }
}
