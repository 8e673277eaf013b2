use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::Expense;

const HEADER: [&str; 5] = ["id", "date", "category", "amount", "description"];

/// Write expenses as CSV with a header row. Returns the number of data rows.
pub(crate) fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for e in expenses {
        wtr.write_record([
            e.id.to_string().as_str(),
            e.date.as_str(),
            e.category.as_str(),
            e.amount.to_string().as_str(),
            e.description.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}

pub(crate) fn export_to_path(expenses: &[Expense], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_csv(expenses, file)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
