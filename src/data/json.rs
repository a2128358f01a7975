// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON row reader

use std::path::Path;

use serde_json::Value;

use super::Row;
use crate::error::{Error, Result};

/// Read a JSON file holding an array of flat objects into ordered rows.
///
/// Non-string scalar values are stringified; nested values keep their
/// JSON rendering.
pub fn read_json_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let Value::Array(items) = value else {
        return Err(Error::config(format!(
            "{} must hold a top-level JSON array",
            path.display()
        )));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(Error::config(format!(
                "{} row {index} is not an object",
                path.display()
            )));
        };
        let row: Row = map
            .into_iter()
            .map(|(key, value)| (key, stringify(&value)))
            .collect();
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "JSON rows loaded");
    Ok(rows)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_rows_from_object_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"username":"ada","attempts":3}},{{"username":"grace","attempts":1}}]"#
        )
        .unwrap();

        let rows = read_json_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("username").map(String::as_str), Some("ada"));
        assert_eq!(rows[0].get("attempts").map(String::as_str), Some("3"));
        assert_eq!(rows[1].get("username").map(String::as_str), Some("grace"));
    }

    #[test]
    fn test_top_level_must_be_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"username":"ada"}}"#).unwrap();

        let err = read_json_rows(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_json_rows(file.path()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
