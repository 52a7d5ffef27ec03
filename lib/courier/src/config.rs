//! Transport and API configuration types.

use std::time::Duration;

use url::Url;

use crate::{Error, Headers, JSON_CONTENT_TYPE, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Configuration for the live transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Connection timeout, enforced by the TCP connector.
    pub connect_timeout: Duration,
    /// `User-Agent` sent when the request does not carry one.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("courier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TransportConfigBuilder {
    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

/// Configuration shared by every API call: where to send it and the
/// default headers to send along.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL endpoint paths are resolved against.
    pub base_url: Url,
    /// Value of the [`API_KEY_HEADER`], if any.
    pub api_key: Option<String>,
    /// Value of the `Accept-Language` header.
    pub locale: String,
}

impl ApiConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// The default header set attached to every request.
    #[must_use]
    pub fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert("Accept".to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert("Accept-Language".to_string(), self.locale.clone());
        if let Some(api_key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), api_key.clone());
        }
        headers
    }

    /// Resolve an endpoint path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }
}

/// Builder for [`ApiConfig`].
#[derive(Debug, Clone, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    locale: Option<String>,
}

impl ApiConfigBuilder {
    /// Set the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the locale sent as `Accept-Language`.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Build the configuration.
    ///
    /// A base URL without a trailing slash gets one, so that relative
    /// endpoint paths extend it instead of replacing its last segment.
    pub fn build(self) -> Result<ApiConfig> {
        let raw = self
            .base_url
            .ok_or_else(|| Error::invalid_request("missing base URL"))?;
        let mut base_url = Url::parse(&raw)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(ApiConfig {
            base_url,
            api_key: self.api_key,
            locale: self.locale.unwrap_or_else(|| "en-US".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_config() {
        let config = TransportConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("courier/"));
    }

    #[test]
    fn transport_builder_overrides() {
        let config = TransportConfig::builder()
            .connect_timeout(Duration::from_secs(2))
            .user_agent("app/1.0")
            .build();

        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.user_agent, "app/1.0");
    }

    #[test]
    fn api_config_default_headers() {
        let config = ApiConfig::builder()
            .base_url("https://api.example.com")
            .api_key("secret")
            .locale("da-DK")
            .build()
            .expect("config");

        let headers = config.default_headers();
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(headers.get("Accept-Language").map(String::as_str), Some("da-DK"));
        assert_eq!(headers.get(API_KEY_HEADER).map(String::as_str), Some("secret"));
    }

    #[test]
    fn api_config_without_key() {
        let config = ApiConfig::builder()
            .base_url("https://api.example.com")
            .build()
            .expect("config");

        assert_eq!(config.locale, "en-US");
        assert!(!config.default_headers().contains_key(API_KEY_HEADER));
    }

    #[test]
    fn api_config_joins_paths_under_base() {
        let config = ApiConfig::builder()
            .base_url("https://api.example.com/v2")
            .build()
            .expect("config");

        let url = config.url("login").expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/v2/login");
    }

    #[test]
    fn api_config_requires_base_url() {
        let err = ApiConfig::builder().build().expect_err("no base URL");
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = ApiConfig::builder()
            .base_url("not a url")
            .build()
            .expect_err("bad base URL");
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
