//! Error kinds shared by storage, validation and the boundary operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-range user input. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// Connectivity, constraint or decode failure in SQLite.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Expense not found: {id}")]
    NotFound { id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text safe to show the user. Storage and I/O details stay in the logs.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound { .. } => "Expense not found.".to_string(),
            Self::Storage(_) | Self::Io(_) | Self::Csv(_) => {
                if action.is_empty() {
                    "An error occurred. Please try again.".to_string()
                } else {
                    format!("An error occurred while {action}.")
                }
            }
        }
    }
}
