//! Arguments and setup shared by the commands.

use crate::client::AnalyticsClient;
use crate::config::ClientConfig;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::time::Duration;

/// How to authenticate and reach the API.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Account email used to log in.
    #[arg(short = 'u', long, env = "GA_EMAIL")]
    pub email: Option<String>,

    /// Account password used to log in.
    #[arg(short = 'p', long, env = "GA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Previously obtained auth token; skips logging in.
    #[arg(short = 't', long, env = "GA_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Ask the server for pretty-printed feeds.
    #[arg(long)]
    pub dev_mode: bool,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Log requests to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ConnectionArgs {
    /// Build the client configuration from the flags.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::builder()
            .dev_mode(self.dev_mode)
            .timeout(Duration::from_secs(self.timeout))
            .build()
    }

    /// Create a client, preferring a token over email and password.
    pub fn connect(&self) -> Result<AnalyticsClient> {
        let config = self.config();
        if let Some(token) = &self.token {
            return Ok(AnalyticsClient::with_token(token.clone(), config));
        }

        match (&self.email, &self.password) {
            (Some(email), Some(password)) => AnalyticsClient::login(email, password, config)
                .with_context(|| format!("failed to log in as {email}")),
            _ => bail!("no credentials: pass --token, or --email and --password"),
        }
    }
}

/// Install the stderr log subscriber when `--verbose` or `RUST_LOG` asks for it.
pub fn init_logging(verbose: bool) {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if verbose {
        for directive in ["ganalytics=debug", "ganalytics_feed=debug"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
