//! Account and report query builders.

use crate::filter::compile_filter;
use crate::params::QueryParameters;
use chrono::{Months, NaiveDate};

/// Namespace marker required on every field name sent to the API.
pub const NAMESPACE: &str = "ga:";

/// Default 1-based index of the first result.
pub const DEFAULT_START_INDEX: u32 = 1;

/// Default page size.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Wire date format for `start-date` / `end-date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Conversion into a list of field names.
///
/// Lets builders take either one name or a list of names.
pub trait IntoNames {
    /// Convert into owned names, keeping their order.
    fn into_names(self) -> Vec<String>;
}

impl IntoNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoNames for &String {
    fn into_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoNames for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

impl IntoNames for Vec<&str> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoNames for &[String] {
    fn into_names(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoNames for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl<const N: usize> IntoNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Prefix a field name with the namespace marker.
pub fn prefixed(name: &str) -> String {
    format!("{NAMESPACE}{name}")
}

/// Prefix a sort entry, keeping a leading `-` (descending) outside the prefix.
pub fn prefixed_sort(entry: &str) -> String {
    match entry.strip_prefix('-') {
        Some(name) => format!("-{NAMESPACE}{name}"),
        None => prefixed(entry),
    }
}

/// Prefix and comma-join names, keeping their input order.
pub fn join_prefixed(names: &[String]) -> String {
    names
        .iter()
        .map(|n| prefixed(n))
        .collect::<Vec<_>>()
        .join(",")
}

/// The default start date: one calendar month before `today`.
pub fn default_start_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(1)).unwrap_or(today)
}

/// Parameters of an account feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountQuery {
    /// 1-based index of the first account.
    pub start_index: u32,
    /// Maximum number of accounts returned.
    pub max_results: u32,
}

impl AccountQuery {
    /// Query for the first page of accounts.
    pub const fn new() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the start index.
    pub const fn start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    /// Set the page size.
    pub const fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Build the wire parameters.
    pub fn to_parameters(&self) -> QueryParameters {
        let mut params = QueryParameters::new();
        params.insert("start-index", self.start_index.to_string());
        params.insert("max-results", self.max_results.to_string());
        params
    }
}

impl Default for AccountQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// A report feed request.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ganalytics_query::ReportQuery;
///
/// let query = ReportQuery::new("12345", "browser", ["pageviews", "visits"])
///     .sort("-pageviews")
///     .filter("pageviews > 100")
///     .start_date("2010-01-01")
///     .end_date("2010-01-31");
///
/// let today = NaiveDate::from_ymd_opt(2010, 2, 15).unwrap();
/// let params = query.to_parameters(today, false);
/// assert_eq!(params.get("metrics"), Some("ga:pageviews,ga:visits"));
/// assert_eq!(params.get("sort"), Some("-ga:pageviews"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    report_id: String,
    dimensions: Vec<String>,
    metrics: Vec<String>,
    sort: Vec<String>,
    filter: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    start_index: u32,
    max_results: u32,
}

impl ReportQuery {
    /// Create a query for a report (profile) id.
    pub fn new(
        report_id: impl Into<String>,
        dimensions: impl IntoNames,
        metrics: impl IntoNames,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            dimensions: dimensions.into_names(),
            metrics: metrics.into_names(),
            sort: Vec::new(),
            filter: None,
            start_date: None,
            end_date: None,
            start_index: DEFAULT_START_INDEX,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Sort by one or more fields; prefix a name with `-` for descending.
    pub fn sort(mut self, sort: impl IntoNames) -> Self {
        self.sort = sort.into_names();
        self
    }

    /// Set a human-written filter expression.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the first day of the reporting window (`YYYY-MM-DD`).
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the last day of the reporting window (`YYYY-MM-DD`).
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Set the start index.
    pub const fn start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    /// Set the page size.
    pub const fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// The report id without namespace.
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Requested dimension names.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Requested metric names.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Build the wire parameters.
    ///
    /// `today` anchors the default start date; `pretty_print` sets the
    /// `prettyprint` diagnostics parameter.
    pub fn to_parameters(&self, today: NaiveDate, pretty_print: bool) -> QueryParameters {
        let mut params = QueryParameters::new();
        params.insert("ids", prefixed(&self.report_id));
        params.insert("dimensions", join_prefixed(&self.dimensions));

        let metrics = join_prefixed(&self.metrics);
        let sort = if self.sort.is_empty() {
            metrics.clone()
        } else {
            self.sort
                .iter()
                .map(|s| prefixed_sort(s))
                .collect::<Vec<_>>()
                .join(",")
        };
        params.insert("metrics", metrics);
        params.insert("sort", sort);

        if let Some(filters) = self.filter.as_deref().and_then(compile_filter) {
            params.insert_encoded("filters", filters);
        }

        let start_date = self.start_date.clone().unwrap_or_else(|| {
            default_start_date(today)
                .format(DATE_FORMAT)
                .to_string()
        });
        params.insert("start-date", start_date);
        if let Some(end_date) = &self.end_date {
            params.insert("end-date", end_date.clone());
        }

        params.insert("start-index", self.start_index.to_string());
        params.insert("max-results", self.max_results.to_string());
        params.insert("prettyprint", if pretty_print { "true" } else { "false" });
        params
    }
}
