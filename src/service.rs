//! The four user-facing operations: view the dashboard, add an expense,
//! delete an expense and set the budget.
//!
//! Each one takes the `Database` handle explicitly, validates before writing and
//! turns its result into a `Notice` for the front end. Storage failures are logged
//! in full here and shown to the user only as a generic message.

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, Expense};
use crate::report::{self, MonthlyTotals};
use crate::validate::{self, ExpenseForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Warning,
    Error,
}

/// One-line message for the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) level: Level,
    pub(crate) message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Log `err` with its kind and reduce it to what the user may see.
    pub(crate) fn from_error(err: &Error, action: &str) -> Self {
        match err {
            Error::Validation(_) => warn!(action, error = %err, "rejected input"),
            Error::NotFound { .. } => info!(action, error = %err, "nothing to do"),
            Error::Storage(_) | Error::Io(_) | Error::Csv(_) => {
                error!(action, error = ?err, "operation failed")
            }
        }
        Self::new(Level::Error, err.user_message(action))
    }
}

/// Everything the dashboard shows, computed from one snapshot of the data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dashboard {
    /// The requested page of expenses, newest first.
    pub(crate) expenses: Vec<Expense>,
    pub(crate) page: u32,
    pub(crate) total_pages: u32,
    pub(crate) expense_count: i64,
    pub(crate) budget: Decimal,
    /// Sum over all expenses, not just the current page.
    pub(crate) total: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) categories: Vec<String>,
    pub(crate) category_totals: Vec<Decimal>,
    pub(crate) monthly: MonthlyTotals,
    pub(crate) forecast: Decimal,
}

pub(crate) fn view(db: &Database, page: u32, page_size: u32) -> Result<Dashboard> {
    let page_size = page_size.max(1);
    let all = db.list_expenses()?;
    let categories = db.distinct_categories()?;
    let budget = Budget::value_or_zero(db.get_budget()?.as_ref());

    let total = report::compute_total(&all)?;
    let balance = report::compute_balance(budget, total);
    let category_totals = report::compute_category_totals(&all, &categories)?;
    let monthly = report::compute_monthly_totals(&all)?;
    let forecast = report::forecast_next_period(&monthly)?;

    let expense_count = db.expense_count()?;
    let total_pages = u64::try_from(expense_count)
        .unwrap_or(0)
        .div_ceil(u64::from(page_size))
        .max(1);
    let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
    let page = page.max(1);

    Ok(Dashboard {
        expenses: db.list_expenses_page(page, page_size)?,
        page,
        total_pages,
        expense_count,
        budget,
        total,
        balance,
        categories,
        category_totals,
        monthly,
        forecast,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddOutcome {
    pub(crate) expense: Expense,
    /// Set when the new total is above the budget. A warning, the expense is still stored.
    pub(crate) overspend: Option<Decimal>,
}

impl AddOutcome {
    pub(crate) fn notice(&self, currency: &str) -> Notice {
        match self.overspend {
            Some(over) => Notice::new(
                Level::Warning,
                format!("Warning: Your expenses have exceeded your budget by {currency}{over}."),
            ),
            None => Notice::new(Level::Success, "Expense added successfully!"),
        }
    }
}

/// Budget and totals are read before the insert, so once the row is committed
/// nothing else can fail and the outcome always reports the stored expense.
pub(crate) fn add(db: &mut Database, form: &ExpenseForm) -> Result<AddOutcome> {
    let new = form.validate()?;

    let budget = Budget::value_or_zero(db.get_budget()?.as_ref());
    let current = report::compute_total(&db.list_expenses()?)?;
    let total = current
        .checked_add(new.amount)
        .ok_or_else(|| Error::validation(report::TOTAL_OVERFLOW))?;

    let expense = db.add_expense(&new)?;
    let overspend = report::over_budget(budget, total);
    if let Some(over) = overspend {
        info!(id = expense.id, %over, "expenses exceed budget");
    }
    Ok(AddOutcome { expense, overspend })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub(crate) fn notice(self) -> Notice {
        match self {
            Self::Deleted => Notice::new(Level::Success, "Expense deleted successfully!"),
            Self::NotFound => Notice::new(Level::Error, "Expense not found."),
        }
    }
}

/// Deleting an unknown id is reported, not failed.
pub(crate) fn delete(db: &mut Database, id: i64) -> Result<DeleteOutcome> {
    if id <= 0 {
        return Err(Error::validation("Expense id must be a positive integer."));
    }
    if db.delete_expense(id)? {
        Ok(DeleteOutcome::Deleted)
    } else {
        let err = Error::NotFound { id };
        info!(error = %err, "delete skipped");
        Ok(DeleteOutcome::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BudgetOutcome {
    Created(Budget),
    Updated(Budget),
}

impl BudgetOutcome {
    pub(crate) fn budget(&self) -> Budget {
        match self {
            Self::Created(b) | Self::Updated(b) => *b,
        }
    }

    pub(crate) fn notice(&self) -> Notice {
        match self {
            Self::Created(_) => Notice::new(Level::Success, "Budget created successfully!"),
            Self::Updated(_) => Notice::new(Level::Success, "Budget updated successfully!"),
        }
    }
}

pub(crate) fn update_budget(db: &mut Database, raw: &str) -> Result<BudgetOutcome> {
    let value = validate::parse_budget(raw)?;
    let (budget, created) = db.upsert_budget(value)?;
    Ok(if created {
        BudgetOutcome::Created(budget)
    } else {
        BudgetOutcome::Updated(budget)
    })
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
