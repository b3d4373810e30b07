#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn a(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn empty_ledger() -> Ledger<Database> {
    Ledger::open(Database::open_in_memory().unwrap(), "expenses")
}

// ── Argument helpers ──────────────────────────────────────────

#[test]
fn test_positionals_skip_flags_and_values() {
    let args = a(&["500", "--date", "2024-01-01", "Coffee", "--credit", "beans"]);
    assert_eq!(positionals(&args), vec!["500", "Coffee", "beans"]);
}

#[test]
fn test_flag_value() {
    let args = a(&["file.json", "--max", "25"]);
    assert_eq!(flag_value(&args, "--max"), Some("25"));
    assert_eq!(flag_value(&args, "--date"), None);
}

#[test]
fn test_has_flag() {
    let args = a(&["file.json", "--all"]);
    assert!(has_flag(&args, "--all"));
    assert!(!has_flag(&args, "--credit"));
}

// ── add / delete ──────────────────────────────────────────────

#[test]
fn test_add_debit_by_default() {
    let mut ledger = empty_ledger();
    cli_add(&a(&["250", "Groceries", "run"]), &mut ledger).unwrap();
    let rec = &ledger.records()[0];
    assert_eq!(rec.amount(), dec!(-250));
    assert_eq!(rec.description(), "Groceries run");
}

#[test]
fn test_add_credit_with_date() {
    let mut ledger = empty_ledger();
    cli_add(
        &a(&["--credit", "1,000", "Salary", "--date", "2026-10-01"]),
        &mut ledger,
    )
    .unwrap();
    let rec = &ledger.records()[0];
    assert_eq!(rec.amount(), dec!(1000));
    assert!(rec.is_credit());
    assert_eq!(rec.date(), "2026-10-01");
}

#[test]
fn test_add_requires_description() {
    let mut ledger = empty_ledger();
    assert!(cli_add(&a(&["250"]), &mut ledger).is_err());
    assert!(cli_add(&a(&[]), &mut ledger).is_err());
    assert!(ledger.is_empty());
}

#[test]
fn test_add_rejects_both_directions() {
    let mut ledger = empty_ledger();
    assert!(cli_add(&a(&["5", "x", "--credit", "--debit"]), &mut ledger).is_err());
}

#[test]
fn test_delete_by_index() {
    let mut ledger = empty_ledger();
    cli_add(&a(&["1", "first"]), &mut ledger).unwrap();
    cli_add(&a(&["2", "second"]), &mut ledger).unwrap();
    cli_delete(&a(&["0"]), &mut ledger).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].description(), "second");
}

#[test]
fn test_delete_bad_index() {
    let mut ledger = empty_ledger();
    assert!(cli_delete(&a(&["3"]), &mut ledger).is_err());
    assert!(cli_delete(&a(&["x"]), &mut ledger).is_err());
    assert!(cli_delete(&a(&[]), &mut ledger).is_err());
}
