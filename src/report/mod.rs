//! Spending aggregates computed from a snapshot of expenses and the budget.
//!
//! Everything here is pure: callers fetch rows from `Database` and pass them in,
//! so the figures always reflect the current data.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::Expense;

/// Per-month spending, keyed by English month name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MonthlyTotals {
    entries: Vec<(&'static str, Decimal)>,
}

impl MonthlyTotals {
    fn add(&mut self, month: &'static str, amount: Decimal) -> Result<()> {
        match self.entries.iter_mut().find(|(m, _)| *m == month) {
            Some((_, total)) => *total = checked_sum(*total, amount)?,
            None => self.entries.push((month, amount)),
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        self.entries.iter().copied()
    }

    /// Month names; `labels()[i]` pairs with `values()[i]`.
    pub(crate) fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(m, _)| *m).collect()
    }

    pub(crate) fn values(&self) -> Vec<Decimal> {
        self.entries.iter().map(|(_, total)| *total).collect()
    }
}

pub(crate) const TOTAL_OVERFLOW: &str = "Expenses are too large to total.";

fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::validation(TOTAL_OVERFLOW))
}

/// Sum of amounts. Fails instead of overflowing `Decimal`.
pub(crate) fn compute_total(expenses: &[Expense]) -> Result<Decimal> {
    expenses
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| checked_sum(acc, e.amount))
}

/// Budget minus total. Negative when overspent.
pub(crate) fn compute_balance(budget: Decimal, total: Decimal) -> Decimal {
    budget - total
}

/// How far `total` is over `budget`, if at all.
pub(crate) fn over_budget(budget: Decimal, total: Decimal) -> Option<Decimal> {
    (total > budget).then(|| total - budget)
}

/// Sum per category, aligned index-for-index with `categories`.
/// Matching is exact and case-sensitive.
pub(crate) fn compute_category_totals(
    expenses: &[Expense],
    categories: &[String],
) -> Result<Vec<Decimal>> {
    categories
        .iter()
        .map(|category| {
            expenses
                .iter()
                .filter(|e| &e.category == category)
                .try_fold(Decimal::ZERO, |acc, e| checked_sum(acc, e.amount))
        })
        .collect()
}

/// Group by month name of the expense date. Months of different years share a bucket.
///
/// A stored date that does not parse fails the whole computation rather than
/// dropping the row from the figures.
pub(crate) fn compute_monthly_totals(expenses: &[Expense]) -> Result<MonthlyTotals> {
    let mut totals = MonthlyTotals::default();
    for expense in expenses {
        totals.add(expense.month_name()?, expense.amount)?;
    }
    Ok(totals)
}

/// Next-period estimate: the plain mean of the monthly totals, or zero with no history.
///
/// This is deliberately naive. It ignores trend, seasonality and how recent each
/// month is, so treat it as a rough guide only.
pub(crate) fn forecast_next_period(monthly: &MonthlyTotals) -> Result<Decimal> {
    if monthly.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let sum = monthly
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, total)| checked_sum(acc, total))?;
    Ok(sum / Decimal::from(monthly.len()))
}
