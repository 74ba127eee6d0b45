//! Client and command-line tools for the legacy analytics reporting API.
//!
//! This crate ties the workspace together:
//!
//! - [`AnalyticsClient`]: authenticates, issues account and report requests
//!   and keeps the last mapped result set
//! - [`Transport`]: the narrow HTTP contract, with [`UreqTransport`] as the
//!   blocking implementation
//! - [`ClientConfig`]: endpoint URLs, interface name, developer mode, timeout
//!
//! It also ships two binaries:
//!
//! - `ga-accounts`: list the accounts and profiles visible to a user
//! - `ga-report`: run a report query and print its rows
//!
//! # Example Usage
//!
//! ```bash
//! GA_AUTH_TOKEN=... ga-accounts
//! ga-report 12345 -d browser -m pageviews -s -pageviews -f "pageviews > 100"
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{AnalyticsClient, Results};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

pub use ganalytics_core::{AccountEntry, FeedRootMetadata, ReportEntry, Value};
pub use ganalytics_query::{AccountQuery, ReportQuery};
