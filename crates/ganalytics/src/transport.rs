//! HTTP transport.
//!
//! The client talks to the API through the [`Transport`] trait so tests can
//! substitute canned responses. [`UreqTransport`] is the blocking
//! implementation used in production.

use crate::config::ClientConfig;
use crate::error::ClientError;
use ganalytics_query::QueryParameters;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Parameters are sent as the URL query string.
    Get,
    /// Parameters are sent as a form-encoded body.
    Post,
}

/// A single request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest<'a> {
    /// HTTP method.
    pub method: Method,
    /// Endpoint URL without query string.
    pub url: &'a str,
    /// Query string (GET) or form body (POST) parameters.
    pub data: &'a QueryParameters,
    /// Extra request headers.
    pub headers: Vec<(&'static str, String)>,
}

impl<'a> HttpRequest<'a> {
    /// A GET request.
    pub const fn get(url: &'a str, data: &'a QueryParameters) -> Self {
        Self {
            method: Method::Get,
            url,
            data,
            headers: Vec::new(),
        }
    }

    /// A form POST request.
    pub const fn post(url: &'a str, data: &'a QueryParameters) -> Self {
        Self {
            method: Method::Post,
            url,
            data,
            headers: Vec::new(),
        }
    }

    /// Add a header.
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// The full URL including the query string for GET requests.
    pub fn full_url(&self) -> String {
        match self.method {
            Method::Get if !self.data.is_empty() => {
                format!("{}?{}", self.url, self.data.to_query_string())
            }
            _ => self.url.to_string(),
        }
    }
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Synchronous request/response transport.
///
/// Implementations must return `Ok` for every status code the server
/// answered with; `Err` is reserved for failures to complete the exchange.
pub trait Transport {
    /// Perform one blocking round trip.
    fn request(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, ClientError> {
        (**self).request(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl UreqTransport {
    /// Create a transport using the timeout and interface name of `config`.
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            user_agent: config.interface_name.clone(),
        }
    }
}

impl Transport for UreqTransport {
    fn request(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, ClientError> {
        let url = request.full_url();
        let result = match request.method {
            Method::Get => {
                let mut builder = self.agent.get(&url).header("User-Agent", &self.user_agent);
                for (name, value) in &request.headers {
                    builder = builder.header(*name, value);
                }
                builder.call()
            }
            Method::Post => {
                let mut builder = self
                    .agent
                    .post(&url)
                    .header("User-Agent", &self.user_agent)
                    .header("Content-Type", "application/x-www-form-urlencoded");
                for (name, value) in &request.headers {
                    builder = builder.header(*name, value);
                }
                builder.send(request.data.to_query_string())
            }
        };

        let mut response =
            result.map_err(|e| ClientError::Transport(format!("{}: {e}", request.url)))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let params: QueryParameters = [("start-index", "1"), ("max-results", "20")]
            .into_iter()
            .collect();
        let get = HttpRequest::get("http://example.com/feed", &params);
        assert_eq!(
            get.full_url(),
            "http://example.com/feed?start-index=1&max-results=20"
        );

        let post = HttpRequest::post("http://example.com/login", &params);
        assert_eq!(post.full_url(), "http://example.com/login");

        let empty = QueryParameters::new();
        assert_eq!(
            HttpRequest::get("http://example.com/feed", &empty).full_url(),
            "http://example.com/feed"
        );
    }

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(403, "").is_success());
    }
}
