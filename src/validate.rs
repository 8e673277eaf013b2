use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{NewExpense, DATE_FORMAT};

pub(crate) const INVALID_AMOUNT: &str = "Invalid amount.";
pub(crate) const INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD.";
pub(crate) const INVALID_BUDGET: &str = "Invalid budget amount.";
pub(crate) const TOO_PRECISE: &str = "Too many decimal places. Use at most 28.";
pub(crate) const MISSING_CATEGORY: &str = "Category is required.";

/// Raw add-expense input as it arrives from the user.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseForm {
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) description: Option<String>,
    pub(crate) date: String,
}

impl ExpenseForm {
    /// Check every field and build the expense to insert. Nothing is written here.
    pub(crate) fn validate(&self) -> Result<NewExpense> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::validation(MISSING_CATEGORY));
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        Ok(NewExpense {
            category: category.to_string(),
            amount,
            description: self.description.clone().unwrap_or_default(),
            date,
        })
    }
}

/// Plain unsigned decimal: ASCII digits with at most one '.', at least one digit.
fn is_plain_decimal(s: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

enum PlainDecimal {
    Value(Decimal),
    /// Well-formed, but only representable by rounding (more than 28 decimal places).
    TooPrecise,
    Invalid,
}

fn parse_plain_decimal(s: &str) -> PlainDecimal {
    if !is_plain_decimal(s) {
        return PlainDecimal::Invalid;
    }
    match Decimal::from_str_exact(s) {
        Ok(value) => PlainDecimal::Value(value),
        Err(_) if Decimal::from_str(s).is_ok() => PlainDecimal::TooPrecise,
        Err(_) => PlainDecimal::Invalid,
    }
}

/// Expense amount: a plain decimal strictly greater than zero.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    match parse_plain_decimal(s) {
        PlainDecimal::Value(amount) if amount > Decimal::ZERO => Ok(amount),
        PlainDecimal::TooPrecise => Err(Error::validation(TOO_PRECISE)),
        _ => Err(Error::validation(INVALID_AMOUNT)),
    }
}

/// Budget value: a plain decimal, zero allowed.
pub(crate) fn parse_budget(s: &str) -> Result<Decimal> {
    match parse_plain_decimal(s) {
        PlainDecimal::Value(value) if value >= Decimal::ZERO => Ok(value),
        PlainDecimal::TooPrecise => Err(Error::validation(TOO_PRECISE)),
        _ => Err(Error::validation(INVALID_BUDGET)),
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::validation(INVALID_DATE))
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
