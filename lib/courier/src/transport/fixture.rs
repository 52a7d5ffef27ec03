//! Fixture transport answering from canned responses.
//!
//! Meant for offline runs, demos and tests. Fixtures are keyed by method and
//! URL path; a fixture matches when the request path ends with its path, so
//! `/login` answers `https://api.example.com/v2/login`. The longest matching
//! path wins.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use tower_service::Service;
use tracing::trace;

use super::{Dispatcher, PluginRegistry};
use crate::{
    Error, HttpRequest, JSON_CONTENT_TYPE, Method, Plugin, Request, Response, Result,
    SendFuture, Transport, to_json,
};

/// A canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
    delay: Option<Duration>,
}

impl Fixture {
    /// Fixture with a status code and no body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
            delay: None,
        }
    }

    /// Fixture with a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> Result<Self> {
        Ok(Self::new(status)
            .with_header("Content-Type", JSON_CONTENT_TYPE)
            .with_body(to_json(value)?))
    }

    /// Set the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Answer after a simulated latency.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Status code of the canned response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    fn to_response(&self) -> Response {
        Response::new(self.status, self.headers.clone(), self.body.clone())
    }
}

/// Canned responses keyed by method and path.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    entries: HashMap<(Method, String), Fixture>,
}

impl Fixtures {
    /// Empty fixture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the fixture for `method` and `path`.
    pub fn insert(&mut self, method: Method, path: impl Into<String>, fixture: Fixture) {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        self.entries.insert((method, path), fixture);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, method: Method, path: impl Into<String>, fixture: Fixture) -> Self {
        self.insert(method, path, fixture);
        self
    }

    /// Find the fixture answering `method` on `path`.
    #[must_use]
    pub fn find(&self, method: Method, path: &str) -> Option<&Fixture> {
        self.entries
            .iter()
            .filter(|((m, key), _)| *m == method && path.ends_with(key.as_str()))
            .max_by_key(|((_, key), _)| key.len())
            .map(|(_, fixture)| fixture)
    }

    /// Number of fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no fixture.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base service of [`FixtureTransport`].
#[derive(Debug, Clone)]
struct FixtureClient {
    fixtures: Arc<Fixtures>,
}

impl Service<HttpRequest> for FixtureClient {
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send + 'static>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let method = request.method();
        let path = request.url().path().to_string();
        let found = self
            .fixtures
            .find(method, &path)
            .map(|fixture| (fixture.to_response(), fixture.delay));

        Box::pin(async move {
            let Some((response, delay)) = found else {
                return Err(Error::FixtureNotFound { method, path });
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            trace!(status = response.status(), "answered from fixture");
            Ok(response)
        })
    }
}

/// Transport answering from [`Fixtures`] without touching the network.
///
/// Plugins and validation rules behave exactly as with the live transport.
///
/// # Example
///
/// ```ignore
/// use courier::{Fixture, Fixtures, FixtureTransport, Method};
///
/// let fixtures = Fixtures::new()
///     .with(Method::Post, "/login", Fixture::json(200, &session)?);
/// let transport = FixtureTransport::new(fixtures);
/// ```
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    dispatcher: Dispatcher,
    fixtures: Arc<Fixtures>,
}

impl FixtureTransport {
    /// Create a transport without plugins.
    #[must_use]
    pub fn new(fixtures: Fixtures) -> Self {
        Self::builder(fixtures).build()
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder(fixtures: Fixtures) -> FixtureTransportBuilder {
        FixtureTransportBuilder {
            fixtures,
            plugins: PluginRegistry::default(),
        }
    }

    /// The canned responses.
    #[must_use]
    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }
}

impl Transport for FixtureTransport {
    fn send(&self, request: Request) -> SendFuture {
        self.dispatcher.dispatch(request)
    }
}

/// Builder for [`FixtureTransport`].
pub struct FixtureTransportBuilder {
    fixtures: Fixtures,
    plugins: PluginRegistry,
}

impl std::fmt::Debug for FixtureTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureTransportBuilder")
            .field("fixtures", &self.fixtures.len())
            .field("plugins_count", &self.plugins.len())
            .finish()
    }
}

impl FixtureTransportBuilder {
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
    pub fn build(self) -> FixtureTransport {
        let fixtures = Arc::new(self.fixtures);
        let client = FixtureClient {
            fixtures: Arc::clone(&fixtures),
        };

        FixtureTransport {
            dispatcher: Dispatcher::new(client, self.plugins.into_list()),
            fixtures,
        }
    }
}
