//! Feed mapping for the legacy analytics API.
//!
//! Responses from the account and report endpoints are Atom feeds extended
//! with two vocabularies: opensearch paging fields and the provider's `dxp:`
//! analytics elements. This crate parses such a document (fully buffered, it
//! is small) and maps it into [`ganalytics_core`] entries.
//!
//! Optional sections (`dxp:aggregates`, `dxp:dataSource`) may be absent and
//! are treated as empty. A body that is not well-formed XML fails the whole
//! call; there are no partial results.
//!
//! # Example
//!
//! ```
//! use ganalytics_feed::map_report_feed;
//! use ganalytics_core::Value;
//!
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"
//!                    xmlns:dxp="http://schemas.google.com/analytics/2009">
//!   <entry>
//!     <dxp:dimension name="ga:browser" value="Firefox"/>
//!     <dxp:metric name="ga:pageviews" value="150"/>
//!   </entry>
//! </feed>"#;
//!
//! let feed = map_report_feed(xml).unwrap();
//! assert_eq!(feed.entries[0].get("pageviews").unwrap(), &Value::Integer(150));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod mapper;
pub mod xml;

pub use error::FeedError;
pub use mapper::{map_account_feed, map_report_feed, AccountFeed, ReportFeed};
