// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser session layer
//!
//! Per-worker remote browser sessions over the W3C WebDriver protocol.
//! One live session per worker key, created lazily, torn down explicitly.

mod backend;
mod manager;
mod session;

pub use backend::BackendKind;
pub use manager::{SessionManager, SessionStats, DEFAULT_REMOTE_URL, IMPLICIT_WAIT};
pub use session::BrowserSession;
