// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser backend selection
//!
//! The fixed enumeration of remote automation backends, with the
//! operating-system constraints Edge and Safari carry. Constraint checks
//! run before any process or network I/O.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Remote browser automation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Chrome / Chromium
    Chrome,
    /// Firefox
    Firefox,
    /// Microsoft Edge (Windows hosts only)
    Edge,
    /// Safari (macOS hosts only)
    Safari,
}

impl BackendKind {
    /// Parse a backend name case-insensitively
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chrome" => Ok(BackendKind::Chrome),
            "firefox" => Ok(BackendKind::Firefox),
            "edge" => Ok(BackendKind::Edge),
            "safari" => Ok(BackendKind::Safari),
            _ => Err(Error::UnsupportedBackend(name.to_string())),
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Chrome => "chrome",
            BackendKind::Firefox => "firefox",
            BackendKind::Edge => "edge",
            BackendKind::Safari => "safari",
        }
    }

    /// `browserName` value for W3C capabilities
    pub fn browser_name(&self) -> &'static str {
        match self {
            BackendKind::Chrome => "chrome",
            BackendKind::Firefox => "firefox",
            BackendKind::Edge => "MicrosoftEdge",
            BackendKind::Safari => "safari",
        }
    }

    /// Check this backend against the executing host's operating system
    pub fn validate_platform(&self) -> Result<()> {
        self.validate_platform_on(std::env::consts::OS)
    }

    fn validate_platform_on(&self, os: &str) -> Result<()> {
        let required = match self {
            BackendKind::Edge => Some("windows"),
            BackendKind::Safari => Some("macos"),
            _ => None,
        };

        match required {
            Some(required_os) if os != required_os => Err(Error::UnsupportedPlatform {
                backend: self.name().to_string(),
                required_os,
                os: os.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// `alwaysMatch` capability payload for a new session
    pub fn capabilities(&self) -> Value {
        match self {
            BackendKind::Chrome => json!({
                "browserName": self.browser_name(),
                "goog:chromeOptions": {
                    "args": ["--start-maximized", "--disable-notifications"]
                }
            }),
            BackendKind::Firefox => json!({
                "browserName": self.browser_name(),
                "moz:firefoxOptions": {
                    "args": ["--width=1920", "--height=1080"]
                }
            }),
            _ => json!({ "browserName": self.browser_name() }),
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BackendKind::parse(s)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
