// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSV row reader

use std::path::Path;

use super::Row;
use crate::error::Result;

/// Read a CSV file into ordered rows keyed by the header record
pub fn read_csv_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), field.to_string()))
            .collect();
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "CSV rows loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_rows_keyed_by_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "username,password").unwrap();
        writeln!(file, "ada,secret1").unwrap();
        writeln!(file, "grace,secret2").unwrap();

        let rows = read_csv_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("username").map(String::as_str), Some("ada"));
        assert_eq!(rows[1].get("password").map(String::as_str), Some("secret2"));
    }

    #[test]
    fn test_row_order_preserved() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id").unwrap();
        for i in 0..5 {
            writeln!(file, "{i}").unwrap();
        }

        let rows = read_csv_rows(file.path()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_csv_rows("/definitely/not/here.csv").is_err());
    }
}
