use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Storage format for `Expense::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored spending event. Never mutated after insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    /// Format: "YYYY-MM-DD"
    pub date: String,
}

impl Expense {
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| {
            Error::validation(format!(
                "Expense {} has an invalid stored date: {:?}",
                self.id, self.date
            ))
        })
    }

    /// English month name of the expense date, e.g. "January".
    pub fn month_name(&self) -> Result<&'static str> {
        let date = self.parsed_date()?;
        let month = Month::try_from(date.month() as u8)
            .map_err(|_| Error::validation(format!("Expense {} has no valid month", self.id)))?;
        Ok(month.name())
    }
}

/// A validated expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn into_expense(self, id: i64) -> Expense {
        let date = self.date_string();
        Expense {
            id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date,
        }
    }
}
