//! Client configuration.

use std::time::Duration;

/// ClientLogin authentication endpoint.
pub const CLIENT_LOGIN_URL: &str = "https://www.google.com/accounts/ClientLogin";

/// Account feed endpoint.
pub const ACCOUNT_FEED_URL: &str = "https://www.google.com/analytics/feeds/accounts/default";

/// Report (data) feed endpoint.
pub const REPORT_FEED_URL: &str = "https://www.google.com/analytics/feeds/data";

/// Default HTTP timeout for a single round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`AnalyticsClient`](crate::AnalyticsClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// ClientLogin URL used when authenticating with email and password.
    pub login_url: String,
    /// Account feed URL.
    pub account_feed_url: String,
    /// Report feed URL.
    pub report_feed_url: String,
    /// Name sent as the login `source` and as the User-Agent.
    pub interface_name: String,
    /// Ask the server for pretty-printed feeds.
    pub dev_mode: bool,
    /// Timeout for each HTTP round trip.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            login_url: CLIENT_LOGIN_URL.to_string(),
            account_feed_url: ACCOUNT_FEED_URL.to_string(),
            report_feed_url: REPORT_FEED_URL.to_string(),
            interface_name: format!("ganalytics/{}", env!("CARGO_PKG_VERSION")),
            dev_mode: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ClientLogin URL.
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.config.login_url = url.into();
        self
    }

    /// Set the account feed URL.
    pub fn account_feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.account_feed_url = url.into();
        self
    }

    /// Set the report feed URL.
    pub fn report_feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.report_feed_url = url.into();
        self
    }

    /// Set the interface name.
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        self.config.interface_name = name.into();
        self
    }

    /// Enable or disable developer mode (pretty-printed feeds).
    pub const fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Set the HTTP timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
