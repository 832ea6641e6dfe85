//! Transport trait definitions and common types.
//!
//! This module defines the transport abstraction the resource clients are
//! written against: a single request goes in, a single response (or a
//! transport-level error) comes out. Status handling lives in the callers.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::Error;
use crate::error::ErrorKind;

// ============================================================================
// Method
// ============================================================================

/// HTTP methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request
// ============================================================================

/// Basic credentials attached to a request.
///
/// Only the login call uses these; the password is redacted in `Debug`.
#[derive(Clone)]
pub struct BasicAuth {
    /// The username.
    pub username: String,
    /// The password.
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A single HTTP request.
///
/// The URL is complete: the backend address, the resource path and the
/// already-encoded query string.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The full request URL.
    pub url: Url,
    /// Extra headers (e.g. `Authorization`).
    pub headers: Vec<(String, String)>,
    /// Optional JSON payload.
    pub body: Option<Value>,
    /// Optional basic credentials.
    pub basic_auth: Option<BasicAuth>,
}

impl Request {
    /// Creates a request without headers, body or credentials.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            basic_auth: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON payload.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets basic credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Returns the value of a header set on this request (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

// ============================================================================
// Response
// ============================================================================

/// A backend reply.
///
/// Holds everything needed to report a failure: the final URL, the status,
/// the headers and the raw body text.
#[derive(Debug, Clone)]
pub struct Response {
    url: String,
    status: u16,
    headers: Vec<(String, String)>,
    text: String,
}

impl Response {
    /// Creates a response.
    pub fn new(url: impl Into<String>, status: u16, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Vec::new(),
            text: text.into(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the URL the response was received from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns all headers in the order received.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Looks up a header by name, ignoring ASCII case.
    ///
    /// The comparison is done here rather than relying on the HTTP library
    /// normalizing header names.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidResponse`] carrying the URL, status and
    /// body if the text is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.text).map_err(|e| {
            Error::from_response(ErrorKind::InvalidResponse, "Cannot decode response", self)
                .with_source(e)
        })
    }

    /// Fails with [`ErrorKind::UnexpectedStatus`] unless the status is one of
    /// `expected`.
    pub(crate) fn expect_status(&self, expected: &[u16], message: &'static str) -> Result<(), Error> {
        if expected.contains(&self.status) {
            Ok(())
        } else {
            Err(Error::from_response(ErrorKind::UnexpectedStatus, message, self))
        }
    }
}

// ============================================================================
// TransportClient
// ============================================================================

/// Performs HTTP exchanges with the backend.
///
/// Implementations must not interpret status codes: any reply, including
/// `4xx`/`5xx`, is returned as `Ok(Response)`. Only failures to obtain a
/// reply at all are errors.
///
/// ## Object Safety
///
/// This trait is object-safe and is used as `Arc<dyn TransportClient>`.
#[async_trait::async_trait]
pub trait TransportClient: Send + Sync {
    /// Sends a request and returns the backend's reply.
    async fn send(&self, request: Request) -> Result<Response, Error>;
}

/// Joins the backend address, a path and query parameters into a request URL.
///
/// The address is used verbatim (minus trailing slashes), so a path prefix in
/// the address is preserved.
pub(crate) fn build_url(address: &str, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
    let mut url = Url::parse(&format!("{}{}", address.trim_end_matches('/'), path))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_response_header_is_case_insensitive() {
        let response = Response::new("https://sensu.example.com/x", 200, "[]")
            .with_header("Sensu-Continue", "token");
        assert_eq!(response.header("sensu-continue"), Some("token"));
        assert_eq!(response.header("SENSU-CONTINUE"), Some("token"));
        assert_eq!(response.header("other"), None);
    }

    #[test]
    fn test_response_json() {
        let response = Response::new("https://sensu.example.com/", 200, r#"{"valid":"json"}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value, serde_json::json!({"valid": "json"}));
    }

    #[test]
    fn test_response_invalid_json() {
        let response = Response::new("https://sensu.example.com/here", 204, "");
        let err = response.json::<Value>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.message().contains("decode"));
        assert_eq!(err.url(), Some("https://sensu.example.com/here"));
        assert_eq!(err.status(), Some(204));
        assert_eq!(err.body(), Some(""));
    }

    #[test]
    fn test_expect_status() {
        let response = Response::new("https://sensu.example.com/", 201, "");
        assert!(response.expect_status(&[200, 201], "Expected 200 or 201").is_ok());

        let err = response.expect_status(&[204], "Expected 204").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(err.status(), Some(201));
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let url = build_url("https://sensu.example.com/", "/auth", &[]).unwrap();
        assert_eq!(url.as_str(), "https://sensu.example.com/auth");
    }

    #[test]
    fn test_build_url_keeps_address_prefix() {
        let url = build_url("https://example.com/sensu", "/api/core/v2/namespaces", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/sensu/api/core/v2/namespaces");
    }

    #[test]
    fn test_build_url_encodes_query() {
        let query = vec![
            ("labelSelector".to_string(), r#"env == "prod""#.to_string()),
            ("limit".to_string(), "100".to_string()),
        ];
        let url = build_url("https://sensu.example.com", "/checks", &query).unwrap();
        let request = Request::new(Method::Get, url);
        assert_eq!(request.query_param("labelSelector").as_deref(), Some(r#"env == "prod""#));
        assert_eq!(request.query_param("limit").as_deref(), Some("100"));
        assert_eq!(request.query_param("continue"), None);
    }

    #[test]
    fn test_basic_auth_debug_redacts_password() {
        let url = Url::parse("https://sensu.example.com/auth").unwrap();
        let request = Request::new(Method::Get, url).with_basic_auth("admin", "P@ssw0rd!");
        let debug = format!("{:?}", request);
        assert!(debug.contains("admin"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("P@ssw0rd!"));
    }
}
