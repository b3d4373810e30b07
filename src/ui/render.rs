use rust_decimal::Decimal;

use super::util::fit;
use crate::ledger::{format_amount, Summary};
use crate::models::TransactionRecord;

pub(crate) const CURRENCY: &str = "₹";

/// Credit, debit and net balance. Signs are shown as labels, never as "-".
pub(crate) fn render_summary(summary: &Summary) -> String {
    let net_label = if summary.net >= Decimal::ZERO {
        "surplus"
    } else {
        "deficit"
    };
    let mut out = String::new();
    out.push_str(&format!("  Total Credit:  {CURRENCY}{}\n", format_amount(summary.credit)));
    out.push_str(&format!("  Total Debit:   {CURRENCY}{}\n", format_amount(summary.debit)));
    out.push_str(&format!(
        "  Net Balance:   {CURRENCY}{} ({net_label})\n",
        format_amount(summary.net)
    ));
    out.push_str(&format!("  Transactions:  {}\n", summary.count));
    out
}

/// One line per record with its index, as accepted by `delete`.
pub(crate) fn render_list(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "No transactions yet\n".to_string();
    }

    let mut out = format!("{:<5} {:<12} {:<28} {:>14}\n", "#", "Date", "Description", "Amount");
    out.push_str(&"─".repeat(62));
    out.push('\n');
    for (i, rec) in records.iter().enumerate() {
        let (marker, kind) = if rec.is_credit() { ('+', "CR") } else { ('-', "DR") };
        let amount = format!("{marker}{CURRENCY}{}", format_amount(rec.abs_amount()));
        out.push_str(&format!(
            "{:<5} {} {} {:>14} {kind}\n",
            i,
            fit(rec.date(), 12),
            fit(rec.description(), 28),
            amount,
        ));
    }
    out
}

pub(crate) fn render_record(rec: &TransactionRecord) -> String {
    format!(
        "{} {CURRENCY}{} \"{}\" on {}",
        rec.direction(),
        format_amount(rec.abs_amount()),
        rec.description(),
        rec.date()
    )
}
