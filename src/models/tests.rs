#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_record(direction: Direction, magnitude: Decimal) -> TransactionRecord {
    TransactionRecord::new(direction, magnitude, "Test".into(), "2024-01-15".into())
}

// ── TransactionRecord ─────────────────────────────────────────

#[test]
fn test_credit_is_positive() {
    let rec = make_record(Direction::Credit, dec!(100.00));
    assert!(rec.is_credit());
    assert_eq!(rec.amount(), dec!(100.00));
}

#[test]
fn test_debit_is_negative() {
    let rec = make_record(Direction::Debit, dec!(50.00));
    assert!(!rec.is_credit());
    assert_eq!(rec.amount(), dec!(-50.00));
}

#[test]
fn test_sign_of_input_is_ignored() {
    // Direction decides the sign, never the caller
    assert_eq!(make_record(Direction::Credit, dec!(-7)).amount(), dec!(7));
    assert_eq!(make_record(Direction::Debit, dec!(-7)).amount(), dec!(-7));
}

#[test]
fn test_zero_debit_is_plain_zero() {
    let rec = make_record(Direction::Debit, Decimal::ZERO);
    assert_eq!(rec.amount(), Decimal::ZERO);
    assert!(!rec.amount().is_sign_negative());
    assert_eq!(rec.direction(), Direction::Debit);
}

#[test]
fn test_sign_agrees_with_direction() {
    for magnitude in [dec!(0.01), dec!(1), dec!(1250.50), dec!(99999999)] {
        let credit = make_record(Direction::Credit, magnitude);
        let debit = make_record(Direction::Debit, magnitude);
        assert!(credit.amount().is_sign_positive());
        assert!(debit.amount().is_sign_negative());
        assert_eq!(credit.abs_amount(), debit.abs_amount());
    }
}

#[test]
fn test_from_sms_uses_fixed_label() {
    let rec = TransactionRecord::from_sms(Direction::Debit, dec!(500), "19/10/2026".into());
    assert_eq!(rec.description(), "SMS Transaction");
    assert_eq!(rec.date(), "19/10/2026");
    assert_eq!(rec.amount(), dec!(-500));
}

// ── Serialization ─────────────────────────────────────────────

#[test]
fn test_serialize_field_names() {
    let rec = make_record(Direction::Credit, dec!(1250.5));
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["isCredit"], serde_json::Value::Bool(true));
    assert_eq!(json["description"], "Test");
    assert_eq!(json["date"], "2024-01-15");
    assert!(json.get("amount").is_some());
}

#[test]
fn test_serde_roundtrip_keeps_all_fields() {
    let rec = make_record(Direction::Debit, dec!(1234.56));
    let json = serde_json::to_string(&rec).unwrap();
    let back: TransactionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn test_deserialize_numeric_amount() {
    let json = r#"{"amount": -500, "description": "SMS Transaction", "date": "1/2/2024", "isCredit": false}"#;
    let rec: TransactionRecord = serde_json::from_str(json).unwrap();
    assert_eq!(rec.amount(), dec!(-500));
    assert!(!rec.is_credit());
}

#[test]
fn test_deserialize_repairs_disagreeing_sign() {
    // isCredit is authoritative; the stored sign is not trusted
    let json = r#"{"amount": "-20", "description": "Refund", "date": "2024-01-01", "isCredit": true}"#;
    let rec: TransactionRecord = serde_json::from_str(json).unwrap();
    assert!(rec.is_credit());
    assert_eq!(rec.amount(), dec!(20));

    let json = r#"{"amount": "20", "description": "Lunch", "date": "2024-01-01", "isCredit": false}"#;
    let rec: TransactionRecord = serde_json::from_str(json).unwrap();
    assert_eq!(rec.amount(), dec!(-20));
}

#[test]
fn test_deserialize_rejects_missing_field() {
    let json = r#"{"amount": "20", "description": "Lunch", "date": "2024-01-01"}"#;
    assert!(serde_json::from_str::<TransactionRecord>(json).is_err());
}

// ── Direction ─────────────────────────────────────────────────

#[test]
fn test_direction_display() {
    assert_eq!(format!("{}", Direction::Credit), "Credit");
    assert_eq!(format!("{}", Direction::Debit), "Debit");
}

// ── ManualEntry ───────────────────────────────────────────────

#[test]
fn test_manual_entry_defaults_to_debit_today() {
    let entry = ManualEntry::new("42".into(), "Coffee".into());
    assert_eq!(entry.direction, Direction::Debit);
    assert_eq!(entry.date, chrono::Local::now().format("%Y-%m-%d").to_string());

    let rec = entry.into_record().unwrap();
    assert_eq!(rec.amount(), dec!(-42));
    assert_eq!(rec.description(), "Coffee");
}

#[test]
fn test_manual_entry_credit() {
    let mut entry = ManualEntry::new("1,500.25".into(), "Salary".into());
    entry.direction = Direction::Credit;
    entry.date = "01/10/2026".into();
    let rec = entry.into_record().unwrap();
    assert_eq!(rec.amount(), dec!(1500.25));
    assert!(rec.is_credit());
    assert_eq!(rec.date(), "01/10/2026");
}

#[test]
fn test_manual_entry_missing_fields() {
    let err = ManualEntry::new(" ".into(), "Coffee".into())
        .into_record()
        .unwrap_err();
    assert_eq!(err, EntryError::MissingField("amount"));

    let err = ManualEntry::new("10".into(), "".into())
        .into_record()
        .unwrap_err();
    assert_eq!(err, EntryError::MissingField("description"));
}

#[test]
fn test_manual_entry_invalid_amount() {
    let err = ManualEntry::new("ten".into(), "Coffee".into())
        .into_record()
        .unwrap_err();
    assert_eq!(err, EntryError::InvalidAmount("ten".into()));

    let err = ManualEntry::new("-5".into(), "Coffee".into())
        .into_record()
        .unwrap_err();
    assert_eq!(err, EntryError::InvalidAmount("-5".into()));
}
