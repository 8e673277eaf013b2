#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn expense(id: i64, category: &str, description: &str) -> Expense {
    Expense {
        id,
        category: category.into(),
        amount: dec!(12.50),
        description: description.into(),
        date: "2024-01-15".into(),
    }
}

#[test]
fn test_write_csv_header_only() {
    let mut out = Vec::new();
    let count = write_csv(&[], &mut out).unwrap();
    assert_eq!(count, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "id,date,category,amount,description\n");
}

#[test]
fn test_write_csv_quotes_fields() {
    let mut out = Vec::new();
    let rows = [
        expense(1, "Food", "lunch"),
        expense(2, "Eating, out", "said \"hi\""),
    ];
    let count = write_csv(&rows, &mut out).unwrap();
    assert_eq!(count, 2);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "1,2024-01-15,Food,12.50,lunch");
    assert_eq!(lines[2], "2,2024-01-15,\"Eating, out\",12.50,\"said \"\"hi\"\"\"");
}

#[test]
fn test_export_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let count = export_to_path(&[expense(7, "Rent", "")], &path).unwrap();
    assert_eq!(count, 1);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "7");
    assert_eq!(&records[0][2], "Rent");
    assert_eq!(&records[0][4], "");
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("out.csv");
    let err = export_to_path(&[], &path).unwrap_err();
    assert!(matches!(err, crate::error::Error::Io(_)));
}
