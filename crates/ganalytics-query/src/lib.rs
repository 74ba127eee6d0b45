//! Query building for the legacy analytics feed API.
//!
//! This crate turns typed account and report requests into the ordered wire
//! parameters sent to the feed endpoints.
//!
//! # Overview
//!
//! - [`ReportQuery`] - dimensions, metrics, sort, filter, date range and paging
//!   for a report feed request
//! - [`AccountQuery`] - paging for the account feed
//! - [`compile_filter`] - rewrites `pageviews > 100 && browser == Firefox` into
//!   the wire filter syntax
//! - [`QueryParameters`] - the ordered parameter map handed to the transport
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ganalytics_query::ReportQuery;
//!
//! let params = ReportQuery::new("12345", "browser", "pageviews")
//!     .filter("pageviews>100 && browser==Firefox")
//!     .to_parameters(NaiveDate::from_ymd_opt(2010, 2, 1).unwrap(), false);
//!
//! assert_eq!(params.get("ids"), Some("ga:12345"));
//! assert_eq!(params.get("sort"), Some("ga:pageviews"));
//! assert_eq!(
//!     params.get("filters"),
//!     Some("ga%3Apageviews%3E100%3Bga%3Abrowser%3D%3DFirefox")
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod filter;
pub mod params;

pub use builder::{
    default_start_date, AccountQuery, IntoNames, ReportQuery, DATE_FORMAT, DEFAULT_MAX_RESULTS,
    DEFAULT_START_INDEX, NAMESPACE,
};
pub use filter::{compile_filter, rewrite_filter};
pub use params::QueryParameters;
