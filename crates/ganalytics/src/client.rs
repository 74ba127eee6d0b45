//! The analytics API client.

use crate::auth::{auth_header_value, authenticate};
use crate::config::ClientConfig;
use crate::error::{strip_tags, ClientError};
use crate::transport::{HttpRequest, HttpResponse, Transport, UreqTransport};
use chrono::{Local, NaiveDate};
use ganalytics_core::{
    accessor_name, canonical_name, resolve, AccessorError, AccountEntry, AggregateMetrics,
    FeedRootMetadata, ReportEntry, Value,
};
use ganalytics_feed::{map_account_feed, map_report_feed};
use ganalytics_query::{AccountQuery, QueryParameters, ReportQuery};

/// The result set of the most recent successful request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Results {
    /// No request has succeeded yet.
    #[default]
    Empty,
    /// Entries of an account feed.
    Accounts(Vec<AccountEntry>),
    /// Entries of a report feed.
    Reports(Vec<ReportEntry>),
}

impl Results {
    /// Account entries, if the last request was an account request.
    pub fn accounts(&self) -> Option<&[AccountEntry]> {
        match self {
            Self::Accounts(entries) => Some(entries),
            _ => None,
        }
    }

    /// Report entries, if the last request was a report request.
    pub fn reports(&self) -> Option<&[ReportEntry]> {
        match self {
            Self::Reports(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Accounts(entries) => entries.len(),
            Self::Reports(entries) => entries.len(),
        }
    }

    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An authenticated client for the account and report feeds.
///
/// Each request performs exactly one blocking round trip. The client keeps
/// only the outcome of the most recent successful request: its entries, its
/// root metadata and (for reports) its aggregate metrics. A failed request
/// leaves all of that untouched.
///
/// # Example
///
/// ```no_run
/// use ganalytics::{AnalyticsClient, ClientConfig};
/// use ganalytics_query::ReportQuery;
///
/// let mut client = AnalyticsClient::with_token("DQAAAGgA...", ClientConfig::default());
/// let query = ReportQuery::new("12345", "browser", "pageviews")
///     .filter("pageviews > 100 && browser == Firefox");
/// for entry in client.request_report_data(&query)? {
///     println!("{entry}: {}", entry.get("pageviews")?);
/// }
/// # Ok::<(), ganalytics::ClientError>(())
/// ```
#[derive(Debug)]
pub struct AnalyticsClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
    auth_token: String,
    results: Results,
    account_root: FeedRootMetadata,
    report_root: FeedRootMetadata,
    aggregate_metrics: AggregateMetrics,
}

impl AnalyticsClient<UreqTransport> {
    /// Authenticate with email and password over HTTP.
    pub fn login(email: &str, password: &str, config: ClientConfig) -> Result<Self, ClientError> {
        let transport = UreqTransport::new(&config);
        Self::login_with_transport(email, password, config, transport)
    }

    /// Create a client from a previously obtained auth token.
    pub fn with_token(auth_token: impl Into<String>, config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(auth_token, config, transport)
    }
}

impl<T: Transport> AnalyticsClient<T> {
    /// Authenticate with email and password through `transport`.
    pub fn login_with_transport(
        email: &str,
        password: &str,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self, ClientError> {
        let token = authenticate(&transport, &config, email, password)?;
        tracing::debug!("authenticated {}", email);
        Ok(Self::with_transport(token, config, transport))
    }

    /// Create a client from a token and a transport.
    pub fn with_transport(
        auth_token: impl Into<String>,
        config: ClientConfig,
        transport: T,
    ) -> Self {
        Self {
            config,
            transport,
            auth_token: auth_token.into(),
            results: Results::Empty,
            account_root: FeedRootMetadata::default(),
            report_root: FeedRootMetadata::default(),
            aggregate_metrics: AggregateMetrics::new(),
        }
    }

    /// Request a page of the account feed.
    pub fn request_account_data(
        &mut self,
        query: &AccountQuery,
    ) -> Result<&[AccountEntry], ClientError> {
        let params = query.to_parameters();
        let response = self.fetch("account", &self.config.account_feed_url, &params)?;
        let feed = map_account_feed(&response.body)?;
        tracing::debug!("mapped {} account entries", feed.entries.len());

        self.account_root = feed.root;
        self.results = Results::Accounts(feed.entries);
        Ok(self.results.accounts().unwrap_or_default())
    }

    /// Request report data, using the local date to default the start date.
    pub fn request_report_data(
        &mut self,
        query: &ReportQuery,
    ) -> Result<&[ReportEntry], ClientError> {
        self.request_report_data_on(query, Local::now().date_naive())
    }

    /// Request report data with an explicit "today" for the default start date.
    pub fn request_report_data_on(
        &mut self,
        query: &ReportQuery,
        today: NaiveDate,
    ) -> Result<&[ReportEntry], ClientError> {
        let params = query.to_parameters(today, self.config.dev_mode);
        let response = self.fetch("report", &self.config.report_feed_url, &params)?;
        let feed = map_report_feed(&response.body)?;
        tracing::debug!(
            "mapped {} report entries and {} aggregates",
            feed.entries.len(),
            feed.aggregates.len()
        );

        self.report_root = feed.root;
        self.aggregate_metrics = feed.aggregates;
        self.results = Results::Reports(feed.entries);
        Ok(self.results.reports().unwrap_or_default())
    }

    fn fetch(
        &self,
        kind: &'static str,
        url: &str,
        params: &QueryParameters,
    ) -> Result<HttpResponse, ClientError> {
        tracing::debug!(
            "requesting {} data from {} ({} parameters)",
            kind,
            url,
            params.len()
        );
        let request = HttpRequest::get(url, params)
            .header("Authorization", auth_header_value(&self.auth_token));
        let response = self.transport.request(&request)?;

        if !response.is_success() {
            tracing::warn!("{} request failed with HTTP {}", kind, response.status);
            return Err(ClientError::Request {
                kind,
                status: response.status,
                body: strip_tags(&response.body),
            });
        }
        Ok(response)
    }

    /// The last result set.
    pub const fn results(&self) -> &Results {
        &self.results
    }

    /// Aggregate metrics of the last report.
    pub const fn aggregate_metrics(&self) -> &AggregateMetrics {
        &self.aggregate_metrics
    }

    /// Root metadata of the last report feed.
    pub const fn report_root(&self) -> &FeedRootMetadata {
        &self.report_root
    }

    /// Root metadata of the last account feed.
    pub const fn account_root(&self) -> &FeedRootMetadata {
        &self.account_root
    }

    /// The auth token sent with every request.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Client configuration.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Look up a report root field, falling back to an aggregate metric.
    pub fn get(&self, name: &str) -> Result<&Value, AccessorError> {
        self.report_root
            .get(name)
            .or_else(|| resolve(&self.aggregate_metrics, name))
            .ok_or_else(|| {
                AccessorError::unknown("root parameter or aggregate metric", canonical_name(name))
            })
    }

    /// Method-style lookup, e.g. `call("getTotalResults")`.
    pub fn call(&self, method: &str) -> Result<&Value, AccessorError> {
        self.get(&accessor_name(method)?)
    }
}
