//! Core types for ganalytics
//!
//! This crate provides the in-memory shapes that feed documents are mapped into:
//!
//! - [`Value`] - A string, integer or float read from a feed
//! - [`ValueMap`] - An insertion-ordered name to value map
//! - [`AccountEntry`] - One account/profile from the account feed
//! - [`ReportEntry`] - One report row, split into metrics and dimensions
//! - [`FeedRootMetadata`] - Feed-level fields (paging, dates, data source)
//! - [`classify_metric`] - The float-or-integer rule applied to metric values
//!
//! # Example
//!
//! ```
//! use ganalytics_core::{classify_metric, ReportEntry, Value, ValueMap};
//!
//! let mut metrics = ValueMap::new();
//! metrics.insert("pageviews", classify_metric("150"));
//! let mut dimensions = ValueMap::new();
//! dimensions.insert("browser", "Firefox");
//!
//! let entry = ReportEntry::new(metrics, dimensions);
//! assert_eq!(entry.get("Pageviews").unwrap(), &Value::Integer(150));
//! assert_eq!(entry.to_string(), "Firefox");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod metadata;
pub mod value;

pub use entry::{accessor_name, canonical_name, resolve, AccountEntry, ReportEntry};
pub use error::AccessorError;
pub use metadata::{AggregateMetrics, FeedRootMetadata};
pub use value::{classify_metric, parse_leading_int, Value, ValueMap};
