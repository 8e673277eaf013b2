mod budget;
mod expense;

pub use budget::Budget;
pub use expense::{Expense, NewExpense, DATE_FORMAT};

#[cfg(test)]
mod tests;
