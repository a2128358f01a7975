// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the Telakka fixture layer
//!
//! Capability and validation failures are raised before any I/O happens.
//! Transport and session-creation failures keep the underlying cause so a
//! test report can distinguish "the target misbehaved" from "the harness
//! could not talk to it".

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Telakka operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Telakka
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing setup value
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP verb outside the supported set
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Browser backend outside the supported set
    #[error("Unsupported browser backend: {0}")]
    UnsupportedBackend(String),

    /// Backend requested on an operating system it does not run on
    #[error("{backend} is only supported on {required_os} (host is {os})")]
    UnsupportedPlatform {
        backend: String,
        required_os: &'static str,
        os: String,
    },

    /// File-attachment path does not reference a readable file
    #[error("Attachment file does not exist: {}", path.display())]
    InvalidAttachment { path: PathBuf },

    /// Network-level failure (connection refused, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote automation endpoint rejected a command
    #[error("WebDriver error on {command}: {kind}: {message}")]
    Protocol {
        command: String,
        kind: String,
        message: String,
    },

    /// Assertion requested before any dispatch
    #[error("No response captured yet; dispatch a request first")]
    NoResponse,

    /// Expectation over a captured response not met
    #[error("Assertion failed ({check}): expected {expected}, got {actual}")]
    Assertion {
        check: &'static str,
        expected: String,
        actual: String,
    },

    /// Remote browser session could not be established
    #[error("Failed to create {backend} session: {source}")]
    SessionCreation {
        backend: String,
        #[source]
        source: Box<Error>,
    },

    /// Explicit escalation for a captured status code >= 400
    #[error("Request failed with status code: {0}")]
    RequestFailed(u16),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV data file error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an assertion error
    pub fn assertion(
        check: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::Assertion {
            check,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a protocol error for a WebDriver command
    pub fn protocol(
        command: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Protocol {
            command: command.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Wrap a creation failure for the given backend
    pub fn session_creation(backend: impl Into<String>, source: Error) -> Self {
        Error::SessionCreation {
            backend: backend.into(),
            source: Box::new(source),
        }
    }

    /// Check if this is an assertion failure (target misbehaved)
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Error::Assertion { .. } | Error::RequestFailed(_) | Error::NoResponse
        )
    }

    /// Check if this is a transport-level failure (harness could not talk)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Protocol { .. })
    }

    /// Check if this is a capability/validation failure raised before I/O
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedMethod(_)
                | Error::UnsupportedBackend(_)
                | Error::UnsupportedPlatform { .. }
                | Error::InvalidAttachment { .. }
        )
    }

    /// Get the HTTP status code if this error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestFailed(status) => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_classification() {
        let err = Error::assertion("status code", "200", "404");
        assert!(err.is_assertion());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_request_failed_status() {
        let err = Error::RequestFailed(503);
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_assertion());
    }

    #[test]
    fn test_unsupported_before_io() {
        let err = Error::UnsupportedMethod("TRACE".to_string());
        assert!(err.is_unsupported());

        let err = Error::UnsupportedPlatform {
            backend: "safari".to_string(),
            required_os: "macos",
            os: "linux".to_string(),
        };
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("macos"));
    }

    #[test]
    fn test_session_creation_preserves_cause() {
        let cause = Error::config("driver endpoint unreachable");
        let err = Error::session_creation("chrome", cause);
        assert!(err.to_string().contains("chrome"));
        assert!(err.to_string().contains("driver endpoint unreachable"));
    }
}
