// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request dispatcher
//!
//! Owns a base URI and a reusable client, issues one network call per
//! dispatch, and keeps the latest captured response for assertions.
//! Verb resolution is table-driven; adding a verb is a one-line change
//! to [`SUPPORTED_METHODS`].

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use super::params::RequestParams;
use super::response::CapturedResponse;
use super::DEFAULT_TIMEOUT_SECS;
use crate::config::Config;
use crate::error::{Error, Result};

/// The fixed verb set a dispatch may use
pub const SUPPORTED_METHODS: [(&str, Method); 7] = [
    ("GET", Method::GET),
    ("POST", Method::POST),
    ("PUT", Method::PUT),
    ("PATCH", Method::PATCH),
    ("DELETE", Method::DELETE),
    ("HEAD", Method::HEAD),
    ("OPTIONS", Method::OPTIONS),
];

/// Resolve a verb name case-insensitively against the supported set
fn resolve_method(verb: &str) -> Result<Method> {
    SUPPORTED_METHODS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(verb))
        .map(|(_, method)| method.clone())
        .ok_or_else(|| Error::UnsupportedMethod(verb.to_string()))
}

/// Request dispatcher bound to a base URI
///
/// Not shared across workers; each worker holds its own instance.
#[derive(Debug)]
pub struct Dispatcher {
    client: Client,
    base_uri: Url,
    last: Option<CapturedResponse>,
}

impl Dispatcher {
    /// Create a dispatcher bound to `base_uri`
    pub fn new(base_uri: impl AsRef<str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_uri: parse_base_uri(base_uri.as_ref())?,
            last: None,
        })
    }

    /// Create a dispatcher from configuration (`base_uri` key required)
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.require("base_uri")?)
    }

    /// Rebind subsequent dispatches to a new base URI
    ///
    /// Idempotent; may be called before the first dispatch or at any time.
    pub fn configure(&mut self, base_uri: impl AsRef<str>) -> Result<()> {
        self.base_uri = parse_base_uri(base_uri.as_ref())?;
        tracing::info!(base_uri = %self.base_uri, "Dispatcher reconfigured");
        Ok(())
    }

    /// Get the current base URI
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Issue one request and capture the response.
    ///
    /// Verb and attachment are validated before any network I/O. Headers
    /// apply if non-empty, then query parameters, then the body, then the
    /// multipart attachment. Network failures propagate untouched; retry
    /// policy belongs to the calling scenario.
    pub async fn dispatch(
        &mut self,
        method: &str,
        endpoint: &str,
        headers: HeaderMap,
        params: &RequestParams,
    ) -> Result<CapturedResponse> {
        let method = resolve_method(method)?;

        if let Some(attachment) = &params.attachment {
            if !attachment.path.is_file() {
                return Err(Error::InvalidAttachment {
                    path: attachment.path.clone(),
                });
            }
        }

        let url = self.base_uri.join(endpoint)?;
        tracing::info!(method = %method, url = %url, "Dispatching request");

        let mut builder = self.client.request(method, url);

        if !headers.is_empty() {
            builder = builder.headers(headers);
        }

        if !params.query.is_empty() {
            builder = builder.query(&params.query);
        }

        if let Some(body) = &params.body {
            builder = builder.body(body.clone());
        }

        if let Some(attachment) = &params.attachment {
            let bytes = tokio::fs::read(&attachment.path).await?;
            let file_name = attachment
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("attachment")
                .to_string();
            let form =
                Form::new().part(attachment.field.clone(), Part::bytes(bytes).file_name(file_name));
            builder = builder.multipart(form);
        }

        let start = Instant::now();
        let response = builder.send().await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let final_url = response.url().clone();
        let body = response.bytes().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let snapshot = CapturedResponse::new(status, response_headers, body, final_url, elapsed_ms);
        tracing::info!(
            status = snapshot.status_code(),
            elapsed_ms,
            "Response captured"
        );
        tracing::debug!(body = %snapshot.text_lossy(), "Response body");

        self.last = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Get the last captured response
    pub fn last_response(&self) -> Result<&CapturedResponse> {
        self.last.as_ref().ok_or(Error::NoResponse)
    }

    /// Verify the last captured status code equals `expected`
    pub fn verify_status_code(&self, expected: u16) -> Result<()> {
        let actual = self.last_response()?.status_code();
        if actual != expected {
            return Err(Error::assertion(
                "status code",
                expected.to_string(),
                actual.to_string(),
            ));
        }
        Ok(())
    }

    /// Verify the last captured body contains `expected`
    pub fn verify_response_contains(&self, expected: &str) -> Result<()> {
        let body = self.last_response()?.text_lossy();
        if !body.contains(expected) {
            return Err(Error::assertion(
                "body contains",
                format!("substring '{expected}'"),
                preview(&body),
            ));
        }
        Ok(())
    }

    /// Verify the dotted-path key resolves to a non-empty value
    pub fn verify_json_key_exists(&self, key: &str) -> Result<()> {
        match self.last_response()?.json_key(key)? {
            Some(value) if !is_empty_value(&value) => Ok(()),
            _ => Err(Error::assertion(
                "json key exists",
                format!("value at key '{key}'"),
                "absent or empty".to_string(),
            )),
        }
    }

    /// Extract the list of values at the dotted-path key as strings
    pub fn extract_json_list(&self, key: &str) -> Result<Vec<String>> {
        self.last_response()?.json_list(key)
    }

    /// Escalate when the last captured status code is >= 400
    pub fn handle_failure_status(&self) -> Result<()> {
        let response = self.last_response()?;
        if response.is_failure() {
            tracing::error!(status = response.status_code(), "Request failed");
            return Err(Error::RequestFailed(response.status_code()));
        }
        Ok(())
    }
}

fn parse_base_uri(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::config("base URI must not be empty"));
    }
    Ok(Url::parse(raw)?)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Cap body text quoted into assertion messages
fn preview(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    }
}
