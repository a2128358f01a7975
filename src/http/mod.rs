// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP fixture layer
//!
//! Request dispatch against a target service with response capture and
//! assertion helpers. Capture is separate from assertion: one network
//! round trip can back any number of checks.

mod dispatcher;
pub mod headers;
mod params;
mod response;

pub use dispatcher::Dispatcher;
pub use params::{FileAttachment, RequestParams};
pub use response::CapturedResponse;

/// Baseline content type applied to every request unless overridden
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Default timeout for dispatched requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
