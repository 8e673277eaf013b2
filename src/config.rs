use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::error::Error;

pub(crate) const DB_ENV: &str = "POCKETPLANNER_DB";
pub(crate) const CURRENCY_ENV: &str = "POCKETPLANNER_CURRENCY";
pub(crate) const PAGE_SIZE_ENV: &str = "POCKETPLANNER_PAGE_SIZE";

const DEFAULT_CURRENCY: &str = "₹";
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    /// Display-only; amounts carry no currency.
    pub(crate) currency_symbol: String,
    pub(crate) page_size: u32,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests don't have to touch the process environment.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let currency_symbol = lookup(CURRENCY_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let page_size = match lookup(PAGE_SIZE_ENV) {
            Some(raw) => parse_page_size(&raw)
                .with_context(|| format!("Invalid {PAGE_SIZE_ENV}: {raw:?}"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self {
            db_path,
            currency_symbol,
            page_size,
        })
    }
}

fn parse_page_size(raw: &str) -> std::result::Result<u32, Error> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::validation("page size must be a positive integer")),
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pocketplanner", "PocketPlanner")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("pocketplanner.db"))
}
