// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Captured response snapshot
//!
//! An immutable record of one dispatch outcome. Every accessor is a pure
//! projection over the stored bytes; nothing here touches the network.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Immutable snapshot of a completed request/response cycle
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL the request resolved to
    pub url: Url,
    /// Round-trip time in milliseconds
    pub elapsed_ms: u64,
}

impl CapturedResponse {
    /// Create a new snapshot
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            elapsed_ms,
        }
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status indicates failure (>= 400)
    pub fn is_failure(&self) -> bool {
        self.status.as_u16() >= 400
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::assertion("utf-8 body", "valid UTF-8", e.to_string()))
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON into a concrete type
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Parse body as a JSON value
    pub fn json_value(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Resolve a dotted-path key against the JSON body.
    ///
    /// A path segment applied to an array projects over its elements, so
    /// `users.name` on `{"users":[{"name":"Ada"},{"name":"Grace"}]}`
    /// resolves to `["Ada","Grace"]`. Returns `None` when the path does
    /// not resolve.
    pub fn json_key(&self, key: &str) -> Result<Option<Value>> {
        let root = self.json_value()?;
        Ok(resolve_path(&root, key))
    }

    /// Extract a list of values at the dotted-path key as strings.
    ///
    /// Pure projection over the stored snapshot: calling twice yields the
    /// same values.
    pub fn json_list(&self, key: &str) -> Result<Vec<String>> {
        match self.json_key(key)? {
            Some(Value::Array(items)) => Ok(items.iter().map(stringify).collect()),
            Some(other) => Err(Error::assertion(
                "json list",
                format!("array at key '{key}'"),
                type_name(&other).to_string(),
            )),
            None => Err(Error::assertion(
                "json list",
                format!("array at key '{key}'"),
                "absent".to_string(),
            )),
        }
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Render headers as a name -> value map for logging
    pub fn headers_map(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect()
    }
}

fn resolve_path(root: &Value, path: &str) -> Option<Value> {
    let mut current = root.clone();
    for segment in path.split('.') {
        current = match current {
            Value::Object(ref map) => map.get(segment)?.clone(),
            Value::Array(ref items) => {
                let projected: Vec<Value> = items
                    .iter()
                    .filter_map(|item| item.get(segment).cloned())
                    .collect();
                if projected.is_empty() {
                    return None;
                }
                Value::Array(projected)
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Strings render without quotes; everything else via serde_json
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
