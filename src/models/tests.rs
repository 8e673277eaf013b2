#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(date: &str) -> Expense {
    Expense {
        id: 1,
        category: "Food".into(),
        amount: dec!(12.50),
        description: String::new(),
        date: date.into(),
    }
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_month_name() {
    assert_eq!(make_expense("2024-01-15").month_name().unwrap(), "January");
    assert_eq!(make_expense("2023-12-31").month_name().unwrap(), "December");
}

#[test]
fn test_month_name_invalid_date() {
    let err = make_expense("15-01-2024").month_name().unwrap_err();
    assert!(err.is_validation());
    let err = make_expense("2024-02-30").month_name().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_parsed_date() {
    let date = make_expense("2024-03-09").parsed_date().unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
}

// ── NewExpense ────────────────────────────────────────────────

#[test]
fn test_new_expense_date_string_is_zero_padded() {
    let new = NewExpense {
        category: "Rent".into(),
        amount: dec!(900),
        description: "March".into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    };
    assert_eq!(new.date_string(), "2024-03-01");

    let expense = new.into_expense(7);
    assert_eq!(expense.id, 7);
    assert_eq!(expense.category, "Rent");
    assert_eq!(expense.amount, dec!(900));
    assert_eq!(expense.description, "March");
    assert_eq!(expense.date, "2024-03-01");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_value_or_zero() {
    assert_eq!(Budget::value_or_zero(None), dec!(0));
    let budget = Budget::new(dec!(250.75));
    assert_eq!(Budget::value_or_zero(Some(&budget)), dec!(250.75));
}
