//! Client tests against an in-memory transport.

use chrono::NaiveDate;
use ganalytics::{
    AccountQuery, AnalyticsClient, ClientConfig, ClientError, HttpRequest, HttpResponse, Method,
    ReportQuery, Results, Transport, Value,
};
use std::cell::RefCell;
use std::collections::VecDeque;

const REPORT_FEED: &str = include_str!("../../ganalytics-feed/tests/fixtures/report_feed.xml");
const ACCOUNT_FEED: &str = include_str!("../../ganalytics-feed/tests/fixtures/account_feed.xml");

/// A request as seen by the transport.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    url: String,
    body: String,
    headers: Vec<(&'static str, String)>,
}

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ClientError>>>,
    requests: RefCell<Vec<Recorded>>,
}

impl MockTransport {
    fn new() -> Self {
        Self::default()
    }

    fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ClientError::Transport(message.to_string())));
        self
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn request(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, ClientError> {
        self.requests.borrow_mut().push(Recorded {
            method: request.method,
            url: request.full_url(),
            body: match request.method {
                Method::Post => request.data.to_query_string(),
                Method::Get => String::new(),
            },
            headers: request.headers.clone(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no canned response".to_string())))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 2, 15).unwrap()
}

fn config() -> ClientConfig {
    ClientConfig::builder()
        .login_url("http://login.test/ClientLogin")
        .account_feed_url("http://api.test/accounts/default")
        .report_feed_url("http://api.test/data")
        .interface_name("ganalytics-test")
        .build()
}

fn header<'a>(recorded: &'a Recorded, name: &str) -> Option<&'a str> {
    recorded
        .headers
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_login_then_report() {
    let transport = MockTransport::new()
        .respond(200, "SID=DQAAAGgA\nLSID=DQAAAGsA\nAuth=secret-token\n")
        .respond(200, REPORT_FEED);

    let mut client =
        AnalyticsClient::login_with_transport("user@example.com", "hunter2", config(), &transport)
            .unwrap();
    assert_eq!(client.auth_token(), "secret-token");

    let query = ReportQuery::new("12345", ["browser"], ["pageviews"])
        .filter("pageviews>100 && browser==Firefox");
    let entries = client.request_report_data_on(&query, today()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].to_string(), "Firefox");
    assert_eq!(entries[1].get("pageviews").unwrap(), &Value::Integer(150));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);

    let login = &requests[0];
    assert_eq!(login.method, Method::Post);
    assert_eq!(login.url, "http://login.test/ClientLogin");
    assert_eq!(
        login.body,
        "accountType=GOOGLE&Email=user%40example.com&Passwd=hunter2&source=ganalytics-test&service=analytics"
    );

    let report = &requests[1];
    assert_eq!(report.method, Method::Get);
    assert_eq!(
        report.url,
        "http://api.test/data?ids=ga%3A12345&dimensions=ga%3Abrowser&metrics=ga%3Apageviews\
         &sort=ga%3Apageviews&filters=ga%3Apageviews%3E100%3Bga%3Abrowser%3D%3DFirefox\
         &start-date=2010-01-15&start-index=1&max-results=20&prettyprint=false"
    );
    assert_eq!(
        header(report, "Authorization"),
        Some("GoogleLogin auth=secret-token")
    );
}

#[test]
fn test_login_rejected() {
    let transport = MockTransport::new().respond(403, "Error=BadAuthentication\n");

    match AnalyticsClient::login_with_transport("user@example.com", "wrong", config(), &transport) {
        Err(ClientError::Authentication(body)) => assert_eq!(body, "Error=BadAuthentication"),
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[test]
fn test_login_without_auth_token() {
    let transport = MockTransport::new().respond(200, "SID=abc\nLSID=def\n");

    let result = AnalyticsClient::login_with_transport("u@example.com", "pw", config(), &transport);
    assert!(matches!(result, Err(ClientError::Authentication(_))));
}

#[test]
fn test_report_request_error_strips_html() {
    let transport = MockTransport::new().respond(
        400,
        "<HTML>\n<HEAD><TITLE>Bad Request</TITLE></HEAD>\n<BODY>Invalid dimension: ga:bogus</BODY>\n</HTML>",
    );
    let mut client = AnalyticsClient::with_transport("token", config(), &transport);

    let query = ReportQuery::new("12345", "bogus", "pageviews");
    let err = client.request_report_data_on(&query, today()).unwrap_err();
    match &err {
        ClientError::Request { kind, status, body } => {
            assert_eq!(*kind, "report");
            assert_eq!(*status, 400);
            assert_eq!(body, "Bad Request\nInvalid dimension: ga:bogus");
        }
        other => panic!("expected request error, got {other:?}"),
    }
    assert!(err.to_string().contains("Invalid dimension: ga:bogus"));
    assert_eq!(client.results(), &Results::Empty);
}

#[test]
fn test_failed_request_keeps_previous_state() {
    let transport = MockTransport::new()
        .respond(200, REPORT_FEED)
        .respond(500, "Internal error")
        .respond(200, "<feed><entry>")
        .fail("connection reset");
    let mut client = AnalyticsClient::with_transport("token", config(), &transport);
    let query = ReportQuery::new("12345", "browser", ["pageviews", "avgTimeOnPage"]);

    client.request_report_data_on(&query, today()).unwrap();
    let snapshot = client.results().clone();
    assert_eq!(snapshot.len(), 3);

    let err = client.request_report_data_on(&query, today()).unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 500, .. }));

    let err = client.request_report_data_on(&query, today()).unwrap_err();
    assert!(matches!(err, ClientError::Feed(_)));

    let err = client.request_report_data_on(&query, today()).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));

    assert_eq!(client.results(), &snapshot);
    assert_eq!(client.report_root().total_results(), Some(3));
    assert_eq!(
        client.aggregate_metrics().get("pageviews"),
        Some(&Value::Integer(550))
    );
}

#[test]
fn test_client_accessors() {
    let transport = MockTransport::new().respond(200, REPORT_FEED);
    let mut client = AnalyticsClient::with_transport("token", config(), &transport);
    let query = ReportQuery::new("12345", "browser", ["pageviews", "avgTimeOnPage"]);
    client.request_report_data_on(&query, today()).unwrap();

    assert_eq!(client.get("totalResults").unwrap(), &Value::Integer(3));
    assert_eq!(client.get("TableName").unwrap(), &Value::from("www.example.com"));
    assert_eq!(client.get("startDate").unwrap(), &Value::from("2010-01-01"));
    assert_eq!(client.get("pageviews").unwrap(), &Value::Integer(550));
    assert_eq!(
        client.call("getAvgTimeOnPage").unwrap(),
        &Value::Float(42.73913043478261)
    );

    let err = client.get("bounces").unwrap_err();
    assert_eq!(
        err.to_string(),
        "no valid root parameter or aggregate metric called \"bounces\""
    );
    assert!(client.call("totalResults").is_err());
}

#[test]
fn test_account_and_report_roots_are_separate() {
    let transport = MockTransport::new()
        .respond(200, ACCOUNT_FEED)
        .respond(200, REPORT_FEED);
    let mut client = AnalyticsClient::with_transport("token", config(), &transport);

    let accounts = client
        .request_account_data(&AccountQuery::new().max_results(2))
        .unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].to_string(), "www.example.com");
    assert_eq!(client.account_root().total_results(), Some(2));
    assert_eq!(client.report_root().total_results(), None);
    assert!(client.results().reports().is_none());

    let query = ReportQuery::new("12345", "browser", "pageviews");
    client.request_report_data_on(&query, today()).unwrap();
    assert_eq!(client.account_root().total_results(), Some(2));
    assert_eq!(client.report_root().total_results(), Some(3));
    assert!(client.results().accounts().is_none());

    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        "http://api.test/accounts/default?start-index=1&max-results=2"
    );
    assert_eq!(
        header(&requests[0], "Authorization"),
        Some("GoogleLogin auth=token")
    );
}

#[test]
fn test_dev_mode_requests_pretty_print() {
    let transport = MockTransport::new().respond(200, REPORT_FEED);
    let config = ClientConfig::builder()
        .report_feed_url("http://api.test/data")
        .dev_mode(true)
        .build();
    let mut client = AnalyticsClient::with_transport("token", config, &transport);

    let query = ReportQuery::new("12345", "browser", "pageviews").end_date("2010-01-31");
    client.request_report_data_on(&query, today()).unwrap();

    let url = &transport.requests()[0].url;
    assert!(url.contains("&end-date=2010-01-31&"));
    assert!(url.ends_with("&prettyprint=true"));
}

#[test]
fn test_account_request_error_keeps_previous_root() {
    let transport = MockTransport::new()
        .respond(200, ACCOUNT_FEED)
        .respond(401, "<HTML><BODY>Token expired</BODY></HTML>");
    let mut client = AnalyticsClient::with_transport("token", config(), &transport);

    client.request_account_data(&AccountQuery::new()).unwrap();
    let root = client.account_root().clone();
    let results = client.results().clone();

    let err = client
        .request_account_data(&AccountQuery::new().start_index(21))
        .unwrap_err();
    match &err {
        ClientError::Request { kind, status, body } => {
            assert_eq!(*kind, "account");
            assert_eq!(*status, 401);
            assert_eq!(body, "Token expired");
        }
        other => panic!("expected request error, got {other:?}"),
    }
    assert_eq!(client.account_root(), &root);
    assert_eq!(client.account_root().total_results(), Some(2));
    assert_eq!(client.results(), &results);
}
