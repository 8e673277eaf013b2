use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::error::Error;
use crate::service::{self, Dashboard, Level, Notice};
use crate::validate::ExpenseForm;

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_summary(&[], db, config);
    };
    match command.as_str() {
        "summary" | "s" => cli_summary(&args[2..], db, config),
        "add" => cli_add(&args[2..], db, config),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "budget" => cli_budget(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketplanner {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Pocket Planner — personal expense tracker");
    println!();
    println!("Usage: pocketplanner [command]");
    println!();
    println!("Commands:");
    println!("  (none), summary               Show expenses, totals and forecast");
    println!("    --page <N>                  Page of the expense list (default: 1)");
    println!("  add <category> <amount> <YYYY-MM-DD> [description...]");
    println!("                                Record an expense");
    println!("  delete <id>                   Delete an expense");
    println!("  budget <amount>               Set the monthly budget");
    println!("  export [path]                 Export all expenses to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  POCKETPLANNER_DB              Database file (default: platform data dir)");
    println!("  POCKETPLANNER_CURRENCY        Currency symbol for display (default: ₹)");
    println!("  POCKETPLANNER_PAGE_SIZE       Expenses per page (default: 10)");
    println!("  RUST_LOG                      Log filter, e.g. pocketplanner=debug");
}

fn print_notice(notice: &Notice) {
    match notice.level {
        Level::Success => println!("{}", notice.message),
        Level::Warning => println!("! {}", notice.message),
        Level::Error => eprintln!("Error: {}", notice.message),
    }
}

/// Show the user-facing notice for `err`. Rejected input is not a failure of the
/// program; anything else is returned so the process exits non-zero.
fn fail(err: Error, action: &str) -> Result<()> {
    print_notice(&Notice::from_error(&err, action));
    if err.is_validation() {
        Ok(())
    } else {
        Err(err.into())
    }
}

fn cli_summary(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let page = match flag_value(args, "--page") {
        Some(raw) => match raw.parse::<u32>() {
            Ok(p) => p,
            Err(_) => return fail(Error::validation("Invalid page number."), ""),
        },
        None => 1,
    };
    match service::view(db, page, config.page_size) {
        Ok(dash) => {
            print_dashboard(&dash, &config.currency_symbol);
            Ok(())
        }
        Err(e) => fail(e, ""),
    }
}

fn print_dashboard(dash: &Dashboard, sym: &str) {
    println!("Pocket Planner");
    println!("{}", "─".repeat(40));
    println!("  Budget:     {sym}{:.2}", dash.budget);
    println!("  Spent:      {sym}{:.2}", dash.total);
    println!("  Balance:    {sym}{:.2}", dash.balance);
    println!("  Forecast:   {sym}{:.2}  (mean of monthly totals)", dash.forecast);

    if !dash.categories.is_empty() {
        println!();
        println!("By Category:");
        for (name, amount) in dash.categories.iter().zip(&dash.category_totals) {
            println!("  {name:<24} {sym}{amount:.2}");
        }
    }

    if !dash.monthly.is_empty() {
        println!();
        println!("By Month:");
        for (month, amount) in dash.monthly.labels().iter().zip(dash.monthly.values()) {
            println!("  {month:<24} {sym}{amount:.2}");
        }
    }

    println!();
    if dash.expenses.is_empty() {
        println!("No expenses");
        return;
    }
    println!(
        "Expenses (page {}/{}, {} total):",
        dash.page, dash.total_pages, dash.expense_count
    );
    println!(
        "{:<6} {:<10} {:<18} {:>12} Description",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(64));
    for e in &dash.expenses {
        println!(
            "{:<6} {:<10} {:<18} {:>12} {}",
            e.id,
            e.date,
            e.category,
            format!("{sym}{:.2}", e.amount),
            e.description
        );
    }
}

fn cli_add(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!(
            "Usage: pocketplanner add <category> <amount> <YYYY-MM-DD> [description...]"
        );
    }
    let description = args[3..].join(" ");
    let form = ExpenseForm {
        category: args[0].clone(),
        amount: args[1].clone(),
        description: (!description.is_empty()).then_some(description),
        date: args[2].clone(),
    };
    match service::add(db, &form) {
        Ok(outcome) => {
            print_notice(&outcome.notice(&config.currency_symbol));
            let e = &outcome.expense;
            println!("  #{} {} {} {}", e.id, e.date, e.category, e.amount);
            Ok(())
        }
        Err(e) => fail(e, "adding the expense"),
    }
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: pocketplanner delete <id>");
    };
    let id = match raw.parse::<i64>() {
        Ok(id) => id,
        Err(_) => return fail(Error::validation("Expense id must be a positive integer."), ""),
    };
    match service::delete(db, id) {
        Ok(outcome) => {
            print_notice(&outcome.notice());
            Ok(())
        }
        Err(e) => fail(e, "deleting the expense"),
    }
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: pocketplanner budget <amount>");
    };
    match service::update_budget(db, raw) {
        Ok(outcome) => {
            print_notice(&outcome.notice());
            println!("  Budget: {}", outcome.budget().value);
            Ok(())
        }
        Err(e) => fail(e, "updating the budget"),
    }
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(format!("{home}/pocketplanner-export.csv"))
        });

    let result = db
        .list_expenses()
        .and_then(|expenses| crate::export::export_to_path(&expenses, &output_path));
    match result {
        Ok(0) => {
            println!("No expenses to export (wrote header to {})", output_path.display());
            Ok(())
        }
        Ok(count) => {
            println!("Exported {count} expenses to {}", output_path.display());
            Ok(())
        }
        Err(e) => fail(e, "exporting expenses"),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config() -> Config {
        Config {
            db_path: PathBuf::from(":memory:"),
            currency_symbol: "$".into(),
            page_size: 10,
        }
    }

    #[test]
    fn test_flag_value() {
        let a = args(&["--page", "3"]);
        assert_eq!(flag_value(&a, "--page"), Some("3"));
        assert_eq!(flag_value(&a, "--month"), None);
        assert_eq!(flag_value(&args(&["--page"]), "--page"), None);
    }

    #[test]
    fn test_shellexpand_plain_path() {
        assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
        assert!(!shellexpand("~/out.csv").starts_with('~'));
    }

    #[test]
    fn test_add_and_delete_commands() {
        let mut db = Database::open_in_memory().unwrap();
        let cfg = config();
        let add = args(&["pp", "add", "Food", "12.5", "2024-01-15", "corner", "shop"]);
        as_cli(&add, &mut db, &cfg).unwrap();
        let stored = db.list_expenses().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].description, "corner shop");

        let id = stored[0].id.to_string();
        as_cli(&args(&["pp", "delete", &id]), &mut db, &cfg).unwrap();
        assert!(db.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input_is_not_a_process_failure() {
        let mut db = Database::open_in_memory().unwrap();
        let cfg = config();
        as_cli(&args(&["pp", "add", "Food", "-5", "2024-01-15"]), &mut db, &cfg).unwrap();
        as_cli(&args(&["pp", "budget", "abc"]), &mut db, &cfg).unwrap();
        as_cli(&args(&["pp", "delete", "x"]), &mut db, &cfg).unwrap();
        assert!(db.list_expenses().unwrap().is_empty());
        assert!(db.get_budget().unwrap().is_none());
    }

    #[test]
    fn test_missing_arguments_and_unknown_command() {
        let mut db = Database::open_in_memory().unwrap();
        let cfg = config();
        assert!(as_cli(&args(&["pp", "add", "Food"]), &mut db, &cfg).is_err());
        assert!(as_cli(&args(&["pp", "frobnicate"]), &mut db, &cfg).is_err());
    }

    #[test]
    fn test_summary_runs_on_data() {
        let mut db = Database::open_in_memory().unwrap();
        let cfg = config();
        as_cli(&args(&["pp", "budget", "100"]), &mut db, &cfg).unwrap();
        as_cli(&args(&["pp", "add", "Food", "50", "2024-01-15"]), &mut db, &cfg).unwrap();
        as_cli(&args(&["pp"]), &mut db, &cfg).unwrap();
        as_cli(&args(&["pp", "summary", "--page", "2"]), &mut db, &cfg).unwrap();
    }
}
