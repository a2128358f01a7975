// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request parameter bag
//!
//! Describes the optional parts of a dispatch: query parameters, body
//! payload, and a single multipart file attachment. Body and attachment
//! are independent; both may be absent, either may be present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Optional payload description for one dispatch
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Query parameter name -> value
    pub query: HashMap<String, String>,
    /// Serialized body payload, typically JSON text
    pub body: Option<String>,
    /// Single multipart file attachment
    pub attachment: Option<FileAttachment>,
}

/// A file to attach as a multipart form field
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// Form-field name the file is attached under
    pub field: String,
    /// Path to the file; must exist at dispatch time
    pub path: PathBuf,
}

impl RequestParams {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add multiple query parameters
    pub fn query_map(mut self, params: HashMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    /// Set the body payload
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body to the JSON serialization of `data`
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(data)?);
        Ok(self)
    }

    /// Attach a file under the given multipart form-field name
    pub fn attach(mut self, field: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.attachment = Some(FileAttachment {
            field: field.into(),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Check whether the bag carries no payload at all
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.body.is_none() && self.attachment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params() {
        let params = RequestParams::new();
        assert!(params.is_empty());
        assert!(params.body.is_none());
        assert!(params.attachment.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let params = RequestParams::new()
            .query("page", "2")
            .query("limit", "50")
            .body(r#"{"name":"Grace"}"#);

        assert_eq!(params.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(params.query.len(), 2);
        assert_eq!(params.body.as_deref(), Some(r#"{"name":"Grace"}"#));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_json_body() {
        let mut user = HashMap::new();
        user.insert("name", "Ada");

        let params = RequestParams::new().json(&user).unwrap();
        assert_eq!(params.body.as_deref(), Some(r#"{"name":"Ada"}"#));
    }

    #[test]
    fn test_attachment() {
        let params = RequestParams::new().attach("upload", "/tmp/report.pdf");
        let attachment = params.attachment.unwrap();
        assert_eq!(attachment.field, "upload");
        assert_eq!(attachment.path, PathBuf::from("/tmp/report.pdf"));
    }
}
