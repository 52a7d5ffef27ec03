//! Wire-level HTTP request.
//!
//! An [`HttpRequest`] is what a [`Request`](crate::Request) model becomes right
//! before transmission: method, URL, headers, and an optional byte body. It is
//! the value plugins observe in their pre-send hook.
//!
//! # Example
//!
//! ```
//! use courier_core::{HttpRequest, Method};
//!
//! let request = HttpRequest::builder(Method::Get, "https://api.example.com".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .build();
//! assert!(request.body().is_none());
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug, Clone)]
pub struct HttpRequestBuilder {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl HttpRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body, if any.
    #[must_use]
    pub fn body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> url::Url {
        url::Url::parse("https://api.example.com/login").expect("valid URL")
    }

    #[test]
    fn builder_basic() {
        let request = HttpRequest::builder(Method::Get, url())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/login");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = HttpRequest::builder(Method::Get, url())
            .header("X-Api-Key", "secret")
            .build();

        assert_eq!(request.header("x-api-key"), Some("secret"));
        assert_eq!(request.header("X-API-KEY"), Some("secret"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn builder_with_body() {
        let body = Bytes::from_static(br#"{"loginId":"1"}"#);
        let request = HttpRequest::builder(Method::Post, url())
            .body(Some(body.clone()))
            .build();

        let (method, _, headers, parts_body) = request.into_parts();
        assert_eq!(method, Method::Post);
        assert!(headers.is_empty());
        assert_eq!(parts_body, Some(body));
    }
}
