// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test configuration provider
//!
//! Flat key/value lookup backed by a TOML file. Nested tables flatten to
//! dotted keys, so `[webdriver] remote_url = "..."` is read as
//! `webdriver.remote_url`. Scalar values are stringified; the fixture
//! layer consumes everything as strings.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Immutable key/value configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&raw)
            .map_err(|e| Error::config(format!("cannot parse {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), keys = config.values.len(), "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        let table: toml::Table = raw
            .parse()
            .map_err(|e: toml::de::Error| Error::config(e.to_string()))?;

        let mut values = HashMap::new();
        flatten("", &toml::Value::Table(table), &mut values);
        Ok(Self { values })
    }

    /// Build configuration from an in-memory map
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get the value for a key, or a default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Get the value for a key that must be present
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::config(format!("missing required key '{key}'")))
    }

    /// Number of configured keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no keys are configured
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, value) in table {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, value, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
