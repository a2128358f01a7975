// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-worker session registry
//!
//! Holds at most one live browser session per worker key. The
//! check-then-create sequence for a key is atomic under that key's own
//! lock; distinct workers never contend beyond a short map access, so one
//! worker's session creation cannot stall another's.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;
use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;

use super::backend::BackendKind;
use super::session::BrowserSession;
use crate::config::Config;
use crate::error::{Error, Result};

/// Implicit wait applied to every created session
pub const IMPLICIT_WAIT: Duration = Duration::from_secs(10);

/// Default WebDriver remote endpoint
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:4444";

type SessionSlot = Arc<Mutex<Option<Arc<BrowserSession>>>>;

/// Worker-keyed browser session registry
pub struct SessionManager {
    client: Client,
    remote_url: Url,
    slots: DashMap<String, SessionSlot>,
    stats: Arc<RwLock<SessionStats>>,
}

/// Session lifecycle counters
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Sessions created
    pub created: u64,
    /// get_session calls answered by an existing session
    pub reused: u64,
    /// Sessions quit
    pub quit: u64,
    /// Currently live sessions
    pub active: u64,
    /// Peak concurrent live sessions
    pub peak_active: u64,
}

impl SessionManager {
    /// Create a manager talking to the given WebDriver remote endpoint
    pub fn new(remote_url: impl AsRef<str>) -> Result<Self> {
        let mut remote_url = Url::parse(remote_url.as_ref())?;
        // Keep hub-style paths (/wd/hub) joinable
        if !remote_url.path().ends_with('/') {
            let path = format!("{}/", remote_url.path());
            remote_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            remote_url,
            slots: DashMap::new(),
            stats: Arc::new(RwLock::new(SessionStats::default())),
        })
    }

    /// Create a manager from configuration (`webdriver.remote_url` key,
    /// falling back to [`DEFAULT_REMOTE_URL`])
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_or("webdriver.remote_url", DEFAULT_REMOTE_URL))
    }

    /// Get the worker's live session, creating one if none exists.
    ///
    /// An existing session is returned unchanged: `backend` and `base_url`
    /// are not re-applied to it. On creation the backend is validated
    /// against the host platform before any I/O, the session gets the
    /// fixed implicit wait, and it is navigated to `base_url`.
    pub async fn get_session(
        &self,
        worker: &str,
        backend: BackendKind,
        base_url: &str,
    ) -> Result<Arc<BrowserSession>> {
        let slot = self.slots.entry(worker.to_string()).or_default().clone();
        let mut guard = slot.lock().await;

        if let Some(session) = guard.as_ref() {
            tracing::debug!(worker, session_id = session.session_id(), "Reusing live session");
            self.stats.write().reused += 1;
            return Ok(Arc::clone(session));
        }

        backend.validate_platform()?;

        tracing::info!(worker, backend = %backend, base_url, "Creating browser session");
        let session = Arc::new(
            BrowserSession::create(
                self.client.clone(),
                self.remote_url.clone(),
                backend,
                base_url,
                IMPLICIT_WAIT,
            )
            .await?,
        );
        *guard = Some(Arc::clone(&session));

        let mut stats = self.stats.write();
        stats.created += 1;
        stats.active += 1;
        if stats.active > stats.peak_active {
            stats.peak_active = stats.active;
        }

        Ok(session)
    }

    /// Quit the worker's session if one is live.
    ///
    /// No-op when the worker has no session; safe to call defensively at
    /// scenario end regardless of whether setup succeeded. The
    /// worker association is removed even when the remote teardown fails.
    pub async fn quit_session(&self, worker: &str) -> Result<()> {
        let Some(slot) = self.slots.get(worker).map(|entry| entry.value().clone()) else {
            tracing::debug!(worker, "No session to quit");
            return Ok(());
        };

        let mut guard = slot.lock().await;
        let Some(session) = guard.take() else {
            return Ok(());
        };

        {
            let mut stats = self.stats.write();
            stats.quit += 1;
            stats.active = stats.active.saturating_sub(1);
        }

        tracing::info!(worker, session_id = session.session_id(), "Quitting session");
        session.quit().await
    }

    /// Quit every live session; returns the first teardown error after
    /// attempting all workers
    pub async fn quit_all(&self) -> Result<()> {
        let workers: Vec<String> = self.slots.iter().map(|entry| entry.key().clone()).collect();

        let mut first_err = None;
        for worker in workers {
            if let Err(err) = self.quit_session(&worker).await {
                tracing::warn!(worker, error = %err, "Session teardown failed");
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Check whether the worker currently holds a live session
    pub fn has_session(&self, worker: &str) -> bool {
        match self.slots.get(worker) {
            Some(slot) => match slot.try_lock() {
                Ok(guard) => guard.is_some(),
                // An operation on this worker's slot is in flight
                Err(_) => true,
            },
            None => false,
        }
    }

    /// Number of currently live sessions
    pub fn active_sessions(&self) -> u64 {
        self.stats.read().active
    }

    /// Get lifecycle counters
    pub fn stats(&self) -> SessionStats {
        self.stats.read().clone()
    }

    /// The WebDriver remote endpoint this manager talks to
    pub fn remote_url(&self) -> &Url {
        &self.remote_url
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("remote_url", &self.remote_url.as_str())
            .field("workers", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SESSION_ID: &str = "41d2-90ce";
    const APP_URL: &str = "http://app.example.test";

    async fn webdriver_stub(new_session_expect: Option<u64>) -> MockServer {
        let server = MockServer::start().await;

        let mut new_session = Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "value": { "sessionId": SESSION_ID, "capabilities": {} }
                    }))
                    // Widen the race window for concurrent create tests
                    .set_delay(Duration::from_millis(50)),
            );
        if let Some(expected) = new_session_expect {
            new_session = new_session.expect(expected);
        }
        new_session.mount(&server).await;

        Mock::given(method("POST"))
            .and(path(format!("/session/{SESSION_ID}/timeouts")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/session/{SESSION_ID}/url")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/session/{SESSION_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .mount(&server)
            .await;

        server
    }

    #[tokio::test]
    async fn test_same_worker_reuses_session() {
        let server = webdriver_stub(Some(1)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        let first = manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();
        // Different parameters must not alter or replace the live session
        let second = manager
            .get_session("w1", BackendKind::Firefox, "http://other.example.test")
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.backend(), BackendKind::Chrome);

        let stats = manager.stats();
        assert_eq!(stats.created, 1);
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.active, 1);
    }

    #[tokio::test]
    async fn test_distinct_workers_get_distinct_sessions() {
        let server = webdriver_stub(Some(2)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        let a = manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();
        let b = manager
            .get_session("w2", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(manager.active_sessions(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_worker_creates_one_session() {
        let server = webdriver_stub(Some(1)).await;
        let manager = Arc::new(SessionManager::new(server.uri()).unwrap());

        let (a, b) = tokio::join!(
            manager.get_session("w1", BackendKind::Chrome, APP_URL),
            manager.get_session("w1", BackendKind::Chrome, APP_URL),
        );

        let a = a.unwrap();
        let b = b.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(manager.stats().created, 1);
    }

    #[cfg(not(target_os = "windows"))]
    #[tokio::test]
    async fn test_edge_rejected_off_windows_without_io() {
        let server = webdriver_stub(Some(0)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        let err = manager
            .get_session("w1", BackendKind::Edge, APP_URL)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        assert!(!manager.has_session("w1"));
        assert_eq!(manager.stats().created, 0);
    }

    #[cfg(not(target_os = "macos"))]
    #[tokio::test]
    async fn test_safari_rejected_off_macos_without_io() {
        let server = webdriver_stub(Some(0)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        let err = manager
            .get_session("w1", BackendKind::Safari, APP_URL)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        assert!(!manager.has_session("w1"));
    }

    #[tokio::test]
    async fn test_quit_removes_association() {
        let server = webdriver_stub(Some(2)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();
        assert!(manager.has_session("w1"));

        manager.quit_session("w1").await.unwrap();
        assert!(!manager.has_session("w1"));
        assert_eq!(manager.active_sessions(), 0);

        // A subsequent get creates a fresh session
        manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();
        assert_eq!(manager.stats().created, 2);
    }

    #[tokio::test]
    async fn test_quit_is_idempotent() {
        let server = webdriver_stub(None).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        // No session at all: no-op, not an error
        manager.quit_session("w9").await.unwrap();

        manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap();
        manager.quit_session("w1").await.unwrap();
        manager.quit_session("w1").await.unwrap();

        assert_eq!(manager.stats().quit, 1);
    }

    #[tokio::test]
    async fn test_creation_failure_leaves_no_association() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "value": { "error": "session not created", "message": "no free ports" }
            })))
            .mount(&server)
            .await;

        let manager = SessionManager::new(server.uri()).unwrap();
        let err = manager
            .get_session("w1", BackendKind::Chrome, APP_URL)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SessionCreation { .. }));
        assert!(!manager.has_session("w1"));
        assert_eq!(manager.stats().created, 0);
    }

    #[tokio::test]
    async fn test_quit_all() {
        let server = webdriver_stub(Some(3)).await;
        let manager = SessionManager::new(server.uri()).unwrap();

        for worker in ["w1", "w2", "w3"] {
            manager
                .get_session(worker, BackendKind::Chrome, APP_URL)
                .await
                .unwrap();
        }
        assert_eq!(manager.active_sessions(), 3);

        manager.quit_all().await.unwrap();
        assert_eq!(manager.active_sessions(), 0);
        for worker in ["w1", "w2", "w3"] {
            assert!(!manager.has_session(worker));
        }
    }
}
