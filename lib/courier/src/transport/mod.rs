//! Transport implementations.
//!
//! - [`HyperTransport`] - sends requests over the network
//! - [`FixtureTransport`] - answers from canned [`Fixtures`], no network involved
//!
//! Both share the same dispatch path: the wire request goes through the
//! [`PluginLayer`] into the base service, then the request's validation rules
//! run against the response.

mod fixture;
mod live;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tower::util::BoxCloneService;
use tower::{Layer, ServiceExt};
use tower_service::Service;
use tracing::debug;

use crate::middleware::{PluginLayer, PluginList};
use crate::{Error, HttpRequest, Plugin, Request, Response, ResponseHead, Result, SendFuture};

pub use fixture::{Fixture, FixtureTransport, FixtureTransportBuilder, Fixtures};
pub use live::{HyperTransport, HyperTransportBuilder};

// ============================================================================
// Type-Erased Service
// ============================================================================

/// Type-erased base service with its layers applied.
pub type BoxedService = BoxCloneService<HttpRequest, Response, Error>;

/// Future type for the wire-level service.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Thread-safe wrapper for `BoxedService`.
///
/// `BoxCloneService` is not `Sync`; the mutex only guards the clone taken
/// for each call.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: HttpRequest) -> ServiceFuture {
        let service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(service.oneshot(request))
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Runs the send algorithm shared by every transport.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    service: SyncService,
    plugins: usize,
}

impl Dispatcher {
    /// Wrap a base service with the plugin layer.
    pub(crate) fn new<S>(base: S, plugins: PluginList) -> Self
    where
        S: Service<HttpRequest, Response = Response, Error = Error> + Clone + Send + 'static,
        S::Future: Send,
    {
        let layer = PluginLayer::new(plugins);
        let count = layer.len();
        Self {
            service: SyncService::new(BoxCloneService::new(layer.layer(base))),
            plugins: count,
        }
    }

    /// Materialize, send, and validate a request.
    pub(crate) fn dispatch(&self, request: Request) -> SendFuture {
        let (wire, validations) = request.into_wire();
        let call = self.service.call(wire);

        Box::pin(async move {
            let response = call.await?;

            validations
                .check(ResponseHead::from(&response))
                .inspect_err(|err| debug!(error = %err, "response rejected by validation"))?;

            Ok(response.into_body())
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

/// Plugins collected by a transport builder, in registration order.
#[derive(Default, Clone)]
pub(crate) struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub(crate) fn push(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub(crate) fn len(&self) -> usize {
        self.plugins.len()
    }

    pub(crate) fn into_list(self) -> PluginList {
        self.plugins.into()
    }
}
