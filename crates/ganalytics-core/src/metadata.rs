//! Feed-level metadata.

use crate::entry::resolve;
use crate::value::{Value, ValueMap};
use serde::Serialize;

/// Aggregate metric totals of a report feed, keyed by bare metric name.
pub type AggregateMetrics = ValueMap;

/// Feed-level fields of an account or report feed.
///
/// Well-known keys are `updated`, `generator`, `generatorVersion`, the
/// opensearch paging fields (`totalResults`, `startIndex`, `itemsPerPage`),
/// `startDate` and `endDate`. Report feeds add their data-source properties
/// (e.g. `tableId`, `tableName`) under their bare names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeedRootMetadata {
    fields: ValueMap,
}

impl FeedRootMetadata {
    /// Wrap a field map.
    pub const fn new(fields: ValueMap) -> Self {
        Self { fields }
    }

    /// All fields.
    pub const fn fields(&self) -> &ValueMap {
        &self.fields
    }

    /// Resolve a field by accessor name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        resolve(&self.fields, name)
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn integer(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(Value::as_i64)
    }

    /// Feed update timestamp.
    pub fn updated(&self) -> Option<&str> {
        self.text("updated")
    }

    /// Name of the service that generated the feed.
    pub fn generator(&self) -> Option<&str> {
        self.text("generator")
    }

    /// Version attribute of the generator element.
    pub fn generator_version(&self) -> Option<&str> {
        self.text("generatorVersion")
    }

    /// Total number of results across all pages.
    pub fn total_results(&self) -> Option<i64> {
        self.integer("totalResults")
    }

    /// 1-based index of the first result in this page.
    pub fn start_index(&self) -> Option<i64> {
        self.integer("startIndex")
    }

    /// Page size used by the server.
    pub fn items_per_page(&self) -> Option<i64> {
        self.integer("itemsPerPage")
    }

    /// First day of the reporting window.
    pub fn start_date(&self) -> Option<&str> {
        self.text("startDate")
    }

    /// Last day of the reporting window.
    pub fn end_date(&self) -> Option<&str> {
        self.text("endDate")
    }
}
