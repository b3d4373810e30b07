use rust_decimal::Decimal;

use crate::models::TransactionRecord;

/// Sum of all credit amounts. Never negative.
pub(crate) fn total_credit(records: &[TransactionRecord]) -> Decimal {
    records
        .iter()
        .filter(|r| r.is_credit())
        .map(TransactionRecord::amount)
        .sum()
}

/// Sum of all debit amounts. Debits are stored negative, so this is never positive.
pub(crate) fn total_debit(records: &[TransactionRecord]) -> Decimal {
    records
        .iter()
        .filter(|r| !r.is_credit())
        .map(TransactionRecord::amount)
        .sum()
}

pub(crate) fn net_balance(records: &[TransactionRecord]) -> Decimal {
    total_credit(records) + total_debit(records)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) credit: Decimal,
    pub(crate) debit: Decimal,
    pub(crate) net: Decimal,
    pub(crate) count: usize,
}

impl Summary {
    pub(crate) fn of(records: &[TransactionRecord]) -> Self {
        Self {
            credit: total_credit(records),
            debit: total_debit(records),
            net: net_balance(records),
            count: records.len(),
        }
    }
}

/// Format the magnitude of `val` with thousand separators.
/// The fraction is kept as-is, with trailing zeros dropped, and no sign is
/// rendered: `-1234567.50` → `"1,234,567.5"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = val.abs().normalize().to_string();
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    match frac_part {
        Some(frac) => format!("{with_commas}.{frac}"),
        None => with_commas,
    }
}
