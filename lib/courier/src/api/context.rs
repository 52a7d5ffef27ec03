//! The API facade.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::endpoints;
use super::models::{LoginResponse, PermissionsResponse};
use crate::{ApiConfig, Decoder, JsonDecoder, Request, Result, Transport};

struct Inner<D> {
    config: ApiConfig,
    transport: RwLock<Arc<dyn Transport>>,
    decoder: D,
}

/// Entry point for API calls.
///
/// Builds each request from the [`ApiConfig`], sends it with the current
/// transport and decodes the body. Failures from any stage are returned
/// unchanged.
///
/// Cloning is cheap and clones share the transport: swapping it with
/// [`use_transport`](Self::use_transport) affects every clone. Calls already
/// in flight finish on the transport they started with.
///
/// # Example
///
/// ```ignore
/// use courier::{ApiConfig, ApiContext, HyperTransport};
///
/// let config = ApiConfig::builder()
///     .base_url("https://api.example.com/v1")
///     .api_key("secret")
///     .build()?;
/// let api = ApiContext::new(config, HyperTransport::new());
///
/// let session = api.login("+4512345678", "1234").await?;
/// let permissions = api.permissions(&session.customer_id, &session.token).await?;
/// ```
pub struct ApiContext<D = JsonDecoder> {
    inner: Arc<Inner<D>>,
}

impl<D> Clone for ApiContext<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> fmt::Debug for ApiContext<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ApiContext {
    /// Create a context decoding JSON bodies.
    pub fn new(config: ApiConfig, transport: impl Transport + 'static) -> Self {
        Self::with_decoder(config, transport, JsonDecoder)
    }
}

impl<D: Decoder> ApiContext<D> {
    /// Create a context with a custom decoder.
    pub fn with_decoder(config: ApiConfig, transport: impl Transport + 'static, decoder: D) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(transport);
        Self {
            inner: Arc::new(Inner {
                config,
                transport: RwLock::new(transport),
                decoder,
            }),
        }
    }

    /// The API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// The transport new calls go through.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        let transport = self
            .inner
            .transport
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&transport)
    }

    /// Send the following calls through `transport`.
    pub fn use_transport(&self, transport: Arc<dyn Transport>) {
        let mut current = self
            .inner
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = transport;
        debug!("transport replaced");
    }

    /// Send a request and decode its body.
    pub async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let transport = self.transport();
        let body = transport.send(request).await?;
        self.inner.decoder.decode_and_complete(body)
    }

    /// Log in with a one-time password.
    pub async fn login(&self, login_id: &str, one_time_password: &str) -> Result<LoginResponse> {
        let request = endpoints::login(&self.inner.config, login_id, one_time_password)?;
        self.call(request).await
    }

    /// Fetch the permissions of a customer.
    pub async fn permissions(&self, customer_id: &str, token: &str) -> Result<PermissionsResponse> {
        let request = endpoints::permissions(&self.inner.config, customer_id, token)?;
        self.call(request).await
    }
}
