#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn form(category: &str, amount: &str, date: &str) -> ExpenseForm {
    ExpenseForm {
        category: category.into(),
        amount: amount.into(),
        description: None,
        date: date.into(),
    }
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("50").unwrap(), dec!(50));
    assert_eq!(parse_amount("12.75").unwrap(), dec!(12.75));
}

#[test]
fn test_parse_amount_rejects_non_positive() {
    assert!(parse_amount("0").unwrap_err().is_validation());
    assert!(parse_amount("0.00").unwrap_err().is_validation());
}

#[test]
fn test_parse_amount_rejects_malformed() {
    for raw in ["", ".", "abc", "1.2.3", "1e3", "+5", " 5", "1,000", "$5"] {
        let err = parse_amount(raw).unwrap_err();
        assert!(err.is_validation(), "accepted {raw:?}");
        assert_eq!(err.to_string(), INVALID_AMOUNT);
    }
}

#[test]
fn test_parse_amount_too_many_decimal_places() {
    // 29 decimal places cannot be stored without rounding to zero
    let err = parse_amount("0.00000000000000000000000000001").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), TOO_PRECISE);

    // 28 is the limit and is kept exactly
    let smallest = parse_amount("0.0000000000000000000000000001").unwrap();
    assert!(smallest > Decimal::ZERO);
    assert_eq!(smallest.scale(), 28);
}

#[test]
fn test_parse_amount_largest_value() {
    let max = parse_amount("79228162514264337593543950335").unwrap();
    assert_eq!(max, Decimal::MAX);
    let err = parse_amount("79228162514264337593543950336").unwrap_err();
    assert_eq!(err.to_string(), INVALID_AMOUNT);
}

// ── parse_budget ──────────────────────────────────────────────

#[test]
fn test_parse_budget_allows_zero() {
    assert_eq!(parse_budget("0").unwrap(), dec!(0));
    assert_eq!(parse_budget("1500.50").unwrap(), dec!(1500.50));
}

#[test]
fn test_parse_budget_rejects_negative_and_text() {
    assert_eq!(parse_budget("-1").unwrap_err().to_string(), INVALID_BUDGET);
    assert_eq!(parse_budget("lots").unwrap_err().to_string(), INVALID_BUDGET);
    assert_eq!(
        parse_budget("1.00000000000000000000000000001").unwrap_err().to_string(),
        TOO_PRECISE
    );
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2024-01-15").unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[test]
fn test_parse_date_wrong_format() {
    for raw in ["15-01-2024", "01/15/2024", "2024-13-01", "2023-02-29", ""] {
        let err = parse_date(raw).unwrap_err();
        assert_eq!(err.to_string(), INVALID_DATE, "accepted {raw:?}");
    }
}

// ── ExpenseForm ───────────────────────────────────────────────

#[test]
fn test_form_validate() {
    let mut f = form("  Food ", "50.0", "2024-01-15");
    f.description = Some("lunch".into());
    let new = f.validate().unwrap();
    assert_eq!(new.category, "Food");
    assert_eq!(new.amount, dec!(50.0));
    assert_eq!(new.description, "lunch");
    assert_eq!(new.date_string(), "2024-01-15");
}

#[test]
fn test_form_description_defaults_to_empty() {
    let new = form("Food", "1", "2024-01-15").validate().unwrap();
    assert_eq!(new.description, "");
}

#[test]
fn test_form_requires_category() {
    let err = form("   ", "1", "2024-01-15").validate().unwrap_err();
    assert_eq!(err.to_string(), MISSING_CATEGORY);
}

#[test]
fn test_form_checks_amount_before_date() {
    let err = form("Food", "-5", "not a date").validate().unwrap_err();
    assert_eq!(err.to_string(), INVALID_AMOUNT);
}
