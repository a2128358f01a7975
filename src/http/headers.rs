// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header registry
//!
//! Builds the header set for a dispatch from a fixed baseline plus
//! caller-supplied overrides. Every call starts from a fresh copy of the
//! baseline; an override wins on key collision.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use super::DEFAULT_CONTENT_TYPE;

/// Baseline headers: `Content-Type: application/json`
pub fn defaults() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    headers
}

/// Baseline headers with the given overrides applied on top
pub fn with_overrides(overrides: &HashMap<String, String>) -> HeaderMap {
    let mut headers = defaults();
    for (name, value) in overrides {
        insert(&mut headers, name, value);
    }
    tracing::debug!(count = headers.len(), "Built header set with overrides");
    headers
}

/// Baseline headers plus exactly one additional or overriding entry
pub fn with_header(name: &str, value: &str) -> HeaderMap {
    let mut headers = defaults();
    insert(&mut headers, name, value);
    headers
}

/// Header names are case-insensitive; an invalid name or value is skipped
fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => {
            tracing::warn!(name, value, "Skipping invalid header");
        }
    }
}
