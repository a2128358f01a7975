// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Telakka - Cross-Protocol Test Fixture Layer
//!
//! Fixtures for automated test suites that exercise a target service over
//! HTTP and drive its UI through remote browsers. One dispatcher per
//! worker issues requests and asserts over captured responses; one
//! session manager hands out at most one browser session per worker.
//!
//! ## Features
//!
//! - HTTP dispatch: table-driven verb routing, configurable
//!   headers/query/body/multipart, single network call per dispatch
//! - Response capture: immutable snapshots, assertions never re-fetch
//! - Assertion helpers: status, substring, JSON key, JSON list projection
//! - Browser sessions: W3C WebDriver wire protocol, no embedded engine
//! - Per-worker lifecycle: lazy creation, identity reuse, idempotent quit
//! - Platform gating: Edge only on Windows, Safari only on macOS,
//!   rejected before any I/O
//! - Config provider: flat dotted-key lookup over a TOML file
//! - Data readers: CSV/JSON files as ordered rows of string maps
//!
//! ## Example
//!
//! ```rust,no_run
//! use telakka::{headers, Dispatcher, RequestParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut api = Dispatcher::new("http://api.example.test")?;
//!
//!     api.dispatch("GET", "/users/42", headers::defaults(), &RequestParams::new())
//!         .await?;
//!
//!     api.verify_status_code(200)?;
//!     api.verify_response_contains("Ada")?;
//!     api.verify_json_key_exists("name")?;
//!
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod data;
pub mod error;
pub mod http;

// Re-exports for convenience

// HTTP dispatch
pub use http::headers;
pub use http::{CapturedResponse, Dispatcher, FileAttachment, RequestParams};

// Browser sessions
pub use browser::{BackendKind, BrowserSession, SessionManager, SessionStats};

// Configuration
pub use config::Config;

// Data rows
pub use data::{read_csv_rows, read_json_rows, Row};

// Errors
pub use error::{Error, Result};

/// Telakka version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for a test run.
///
/// Honors `RUST_LOG`; defaults the crate itself to `info`. Safe to call
/// from multiple scenarios; only the first call installs a subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("telakka=info".parse().expect("valid directive")),
        )
        .try_init();
}
