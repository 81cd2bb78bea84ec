//! HTTP exchanges described as plain data.
//!
//! The request builder produces [`HttpRequest`] values and the decoder
//! consumes [`HttpResponse`] values; only a [`Transport`](crate::client::Transport)
//! touches the network. Test doubles and the trace decorator work on these
//! types directly.

use reqwest::{Method, StatusCode};
use url::Url;

/// Identifier sent in the `User-Agent` header of every request.
pub const USER_AGENT: &str = concat!("qvapay-sdk/", env!("CARGO_PKG_VERSION"));

/// Value of the `Content-Type` header of every request, whatever the method.
pub const CONTENT_TYPE: &str = "application/json";

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Create a request carrying the fixed `User-Agent` and `Content-Type`
    /// headers.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: vec![
                ("User-Agent".to_string(), USER_AGENT.to_string()),
                ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
            ],
            body: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Render the request the way it goes out on the wire (HTTP/1.1 text).
    pub fn dump(&self) -> String {
        let mut target = self.url.path().to_string();
        if let Some(query) = self.url.query() {
            target.push('?');
            target.push_str(query);
        }

        let mut out = format!("{} {} HTTP/1.1\r\n", self.method, target);
        if let Some(host) = self.url.host_str() {
            match self.url.port() {
                Some(port) => out.push_str(&format!("Host: {host}:{port}\r\n")),
                None => out.push_str(&format!("Host: {host}\r\n")),
            }
        }
        push_headers(&mut out, &self.headers);
        out.push_str("\r\n");
        if let Some(body) = &self.body {
            out.push_str(body);
        }
        out
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Render the response as HTTP/1.1 text: status line, headers, body.
    pub fn dump(&self) -> String {
        let mut out = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        );
        push_headers(&mut out, &self.headers);
        out.push_str("\r\n");
        out.push_str(&self.body);
        out
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn push_headers(out: &mut String, headers: &[(String, String)]) {
    for (name, value) in headers {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
}
