//! ClientLogin authentication.
//!
//! Logging in POSTs the account credentials to the ClientLogin endpoint. The
//! response body is a list of newline-delimited `key=value` pairs; the value
//! of `Auth` is the token sent with every later request.

use crate::config::ClientConfig;
use crate::error::{strip_tags, ClientError};
use crate::transport::{HttpRequest, Transport};
use ganalytics_query::QueryParameters;

/// Account type sent with the login form.
pub const ACCOUNT_TYPE: &str = "GOOGLE";

/// Service name of the analytics API.
pub const SERVICE: &str = "analytics";

/// Build the ClientLogin form body.
pub fn login_form(email: &str, password: &str, source: &str) -> QueryParameters {
    let mut form = QueryParameters::new();
    form.insert("accountType", ACCOUNT_TYPE);
    form.insert("Email", email);
    form.insert("Passwd", password);
    form.insert("source", source);
    form.insert("service", SERVICE);
    form
}

/// Extract the `Auth` token from a ClientLogin response body.
pub fn parse_auth_token(body: &str) -> Option<String> {
    body.lines()
        .filter_map(|line| line.trim_end_matches('\r').split_once('='))
        .find(|(key, _)| *key == "Auth")
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// The `Authorization` header value for a token.
pub fn auth_header_value(token: &str) -> String {
    format!("GoogleLogin auth={token}")
}

/// Log in with email and password, returning the auth token.
pub fn authenticate<T: Transport>(
    transport: &T,
    config: &ClientConfig,
    email: &str,
    password: &str,
) -> Result<String, ClientError> {
    let form = login_form(email, password, &config.interface_name);
    tracing::debug!("authenticating {} against {}", email, config.login_url);

    let response = transport.request(&HttpRequest::post(&config.login_url, &form))?;
    if !response.is_success() {
        tracing::warn!("authentication failed with HTTP {}", response.status);
        return Err(ClientError::Authentication(strip_tags(&response.body)));
    }

    parse_auth_token(&response.body)
        .ok_or_else(|| ClientError::Authentication(strip_tags(&response.body)))
}
