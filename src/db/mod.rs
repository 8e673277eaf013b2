mod schema;

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::Result;
use crate::models::*;

const EXPENSE_COLUMNS: &str = "id, category, amount, description, date";

/// Owns the SQLite connection. Built once at startup and passed to every operation.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Close the connection, surfacing any error SQLite reports on shutdown.
    pub(crate) fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        let current: Option<i32> = match self.conn.query_row(
            "SELECT version FROM schema_version LIMIT 1",
            [],
            |row| row.get(0),
        ) {
            Ok(v) => Some(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        let tx = self.conn.transaction()?;
        if current.is_none() {
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
        }
        let current = current.unwrap_or(schema::CURRENT_VERSION);
        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tx.execute_batch(sql)?;
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// All expenses, newest date first (ties broken by newest id).
    pub(crate) fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// One page of `list_expenses`. Pages are 1-based; page 0 is treated as page 1.
    pub(crate) fn list_expenses_page(&self, page: u32, per_page: u32) -> Result<Vec<Expense>> {
        let offset = i64::from(page.max(1) - 1) * i64::from(per_page);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY date DESC, id DESC LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt.query_map(params![i64::from(per_page), offset], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))?)
    }

    /// Categories present in the expense table, in the order they first appeared.
    pub(crate) fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM expense GROUP BY category ORDER BY MIN(id)")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn add_expense(&mut self, new: &NewExpense) -> Result<Expense> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO expense (category, amount, description, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new.category,
                new.amount.to_string(),
                new.description,
                new.date_string(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!(id, category = %new.category, amount = %new.amount, "expense added");
        Ok(new.clone().into_expense(id))
    }

    /// Returns false when no expense has this id.
    pub(crate) fn delete_expense(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM expense WHERE id = ?1", params![id])?;
        tx.commit()?;
        debug!(id, removed, "expense delete");
        Ok(removed > 0)
    }

    // ── Budget ────────────────────────────────────────────────

    pub(crate) fn get_budget(&self) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT value FROM budget WHERE id = ?1",
            params![schema::BUDGET_KEY],
            |row| decimal_column(row, 0).map(Budget::new),
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or overwrite the budget row. The flag is true when the row was created.
    pub(crate) fn upsert_budget(&mut self, value: Decimal) -> Result<(Budget, bool)> {
        // Immediate: the existence check and the write happen under one write lock.
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existed: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM budget WHERE id = ?1)",
            params![schema::BUDGET_KEY],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO budget (id, value) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET value = excluded.value",
            params![schema::BUDGET_KEY, value.to_string()],
        )?;
        tx.commit()?;
        debug!(%value, created = !existed, "budget saved");
        Ok((Budget::new(value), !existed))
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: decimal_column(row, 2)?,
        description: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Amounts are stored as TEXT; a value that no longer parses is a storage error.
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
