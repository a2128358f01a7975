// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! WebDriver session handle
//!
//! Thin client for the W3C WebDriver wire protocol: JSON payloads over
//! HTTP against a remote driver endpoint. Only the commands the fixture
//! layer needs are implemented.

use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::{json, Value};
use url::Url;

use super::backend::BackendKind;
use crate::error::{Error, Result};

/// Live handle to one remote browser session
pub struct BrowserSession {
    client: Client,
    remote_url: Url,
    session_id: String,
    backend: BackendKind,
}

impl BrowserSession {
    /// Establish a new remote session.
    ///
    /// Creates the session, applies the implicit wait, and navigates to
    /// `base_url`. Any failure is wrapped as a session-creation error; a
    /// half-created remote session is deleted best-effort.
    pub(crate) async fn create(
        client: Client,
        remote_url: Url,
        backend: BackendKind,
        base_url: &str,
        implicit_wait: Duration,
    ) -> Result<Self> {
        let payload = json!({
            "capabilities": { "alwaysMatch": backend.capabilities() }
        });

        let value = execute(
            &client,
            &remote_url,
            Method::POST,
            "session",
            Some(payload),
            "new session",
        )
        .await
        .map_err(|e| Error::session_creation(backend.name(), e))?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::session_creation(
                    backend.name(),
                    Error::protocol("new session", "invalid response", "missing sessionId"),
                )
            })?;

        tracing::debug!(session_id = %session_id, backend = %backend, "Session established");

        let session = Self {
            client,
            remote_url,
            session_id,
            backend,
        };

        if let Err(err) = session.apply_initial_state(base_url, implicit_wait).await {
            let _ = session.quit().await;
            return Err(Error::session_creation(backend.name(), err));
        }

        Ok(session)
    }

    async fn apply_initial_state(&self, base_url: &str, implicit_wait: Duration) -> Result<()> {
        self.command(
            Method::POST,
            "timeouts",
            Some(json!({ "implicit": implicit_wait.as_millis() as u64 })),
            "set timeouts",
        )
        .await?;
        self.navigate(base_url).await?;
        Ok(())
    }

    /// Navigate the session to a URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!(session_id = %self.session_id, url, "Navigating");
        self.command(Method::POST, "url", Some(json!({ "url": url })), "navigate")
            .await?;
        Ok(())
    }

    /// Get the URL the session is currently on
    pub async fn current_url(&self) -> Result<String> {
        let value = self.command(Method::GET, "url", None, "get url").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::protocol("get url", "invalid response", "value is not a string"))
    }

    /// Get the current page title
    pub async fn title(&self) -> Result<String> {
        let value = self.command(Method::GET, "title", None, "get title").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::protocol("get title", "invalid response", "value is not a string"))
    }

    /// Terminate the remote session
    pub async fn quit(&self) -> Result<()> {
        tracing::debug!(session_id = %self.session_id, "Deleting remote session");
        self.command(Method::DELETE, "", None, "delete session")
            .await?;
        Ok(())
    }

    /// The remote session id
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The backend this session runs on
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        name: &str,
    ) -> Result<Value> {
        let path = if path.is_empty() {
            format!("session/{}", self.session_id)
        } else {
            format!("session/{}/{}", self.session_id, path)
        };
        execute(&self.client, &self.remote_url, method, &path, body, name).await
    }
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("session_id", &self.session_id)
            .field("backend", &self.backend)
            .field("remote_url", &self.remote_url.as_str())
            .finish()
    }
}

/// Issue one wire-protocol command and unwrap the `value` envelope
async fn execute(
    client: &Client,
    remote_url: &Url,
    method: Method,
    path: &str,
    body: Option<Value>,
    command: &str,
) -> Result<Value> {
    let url = remote_url.join(path)?;
    let mut builder = client.request(method, url);
    if let Some(body) = body {
        builder = builder.json(&body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let payload: Value = response.json().await?;
    let value = payload.get("value").cloned().unwrap_or(Value::Null);

    if !status.is_success() {
        let kind = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(Error::protocol(command, kind, message));
    }

    Ok(value)
}
