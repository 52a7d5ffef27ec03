//! Live transport using hyper-util.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower_service::Service;

use super::{Dispatcher, PluginRegistry};
use crate::{
    Error, HttpRequest, Plugin, Request, Response, Result, SendFuture, Transport,
    config::{TransportConfig, TransportConfigBuilder},
    connector::https_connector,
};

// ============================================================================
// Raw Client
// ============================================================================

/// Raw HTTP client using hyper-util: the base service of [`HyperTransport`].
#[derive(Clone)]
struct RawHyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    user_agent: Arc<str>,
}

impl RawHyperClient {
    fn new(config: &TransportConfig) -> Self {
        let connector = https_connector(config.connect_timeout);
        let inner = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            inner,
            user_agent: Arc::from(config.user_agent.as_str()),
        }
    }

    /// Build a hyper request from a wire request.
    fn build_hyper_request(&self, request: HttpRequest) -> Result<http::Request<Full<Bytes>>> {
        let has_user_agent = request.header("user-agent").is_some();
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !has_user_agent {
            builder = builder.header(http::header::USER_AGENT, &*self.user_agent);
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: HttpRequest) -> Result<Response> {
        let hyper_request = self.build_hyper_request(request)?;

        let response = self
            .inner
            .request(hyper_request)
            .await
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<HttpRequest> for RawHyperClient {
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send + 'static>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.execute(request).await })
    }
}

// ============================================================================
// Public Transport
// ============================================================================

/// Transport sending requests over HTTP(S) with rustls.
///
/// Must be used from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// use courier::HyperTransport;
/// use courier::plugins::LoggingPlugin;
///
/// let transport = HyperTransport::builder()
///     .plugin(LoggingPlugin::new())
///     .build();
/// let body = transport.send(request).await?;
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    dispatcher: Dispatcher,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration and no plugins.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: Request) -> SendFuture {
        self.dispatcher.dispatch(request)
    }
}

/// Builder for [`HyperTransport`].
#[derive(Default)]
pub struct HyperTransportBuilder {
    config: TransportConfigBuilder,
    plugins: PluginRegistry,
}

impl std::fmt::Debug for HyperTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransportBuilder")
            .field("config", &self.config)
            .field("plugins_count", &self.plugins.len())
            .finish()
    }
}

impl HyperTransportBuilder {
    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Register a plugin. Hooks fire in registration order.
    #[must_use]
    pub fn plugin(self, plugin: impl Plugin + 'static) -> Self {
        self.shared_plugin(Arc::new(plugin))
    }

    /// Register a plugin that is also held elsewhere.
    #[must_use]
    pub fn shared_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Build the transport.
    #[must_use]
    pub fn build(self) -> HyperTransport {
        let config = self.config.build();
        let raw = RawHyperClient::new(&config);

        HyperTransport {
            dispatcher: Dispatcher::new(raw, self.plugins.into_list()),
            config,
        }
    }
}
