//! Client error types.

use ganalytics_core::AccessorError;
use ganalytics_feed::FeedError;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Error returned by [`AnalyticsClient`](crate::AnalyticsClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login failed: non-2xx response or no `Auth` token in the body.
    #[error("failed to authenticate user: \"{0}\"")]
    Authentication(String),

    /// An account or report request got a non-2xx response.
    #[error("failed to request {kind} data (HTTP {status}): \"{body}\"")]
    Request {
        /// Which feed was requested, "account" or "report".
        kind: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body with HTML tags stripped.
        body: String,
    },

    /// A named accessor did not resolve.
    #[error(transparent)]
    Accessor(#[from] AccessorError),

    /// The response body could not be mapped.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// The transport could not complete the round trip.
    #[error("HTTP transport error: {0}")]
    Transport(String),
}

/// Remove HTML tags from a response body and trim surrounding whitespace.
pub fn strip_tags(body: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
    tag.replace_all(body, "").trim().to_string()
}
