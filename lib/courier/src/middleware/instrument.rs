//! Plugin hooks as a tower layer.
//!
//! Every call through [`Instrumented`] fires each plugin's pre-send hook, in
//! list order, then the inner service, then each plugin's post-receive hook,
//! in the same order. The call runs inside an `http_request` span so plugin
//! events are tied to their request.
//!
//! Post-receive hooks fire exactly once per call. A call dropped before it
//! completes reports [`Error::Cancelled`] from the drop.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Span, info_span};
use url::Url;

use crate::{Error, HttpRequest, Method, Plugin, Received, Response, Result};

/// Shared, immutable plugin list.
pub type PluginList = Arc<[Arc<dyn Plugin>]>;

/// Layer that fires plugin hooks around the inner service.
///
/// # Example
///
/// ```ignore
/// use courier::middleware::PluginLayer;
/// use courier::plugins::LoggingPlugin;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(PluginLayer::new(vec![Arc::new(LoggingPlugin::new()) as _]))
///     .service(client);
/// ```
#[derive(Clone)]
pub struct PluginLayer {
    plugins: PluginList,
}

impl PluginLayer {
    /// Create a layer firing the given plugins, in order.
    pub fn new(plugins: impl Into<PluginList>) -> Self {
        Self {
            plugins: plugins.into(),
        }
    }

    /// Number of plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` if the layer has no plugin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginLayer")
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

impl<S> Layer<S> for PluginLayer {
    type Service = Instrumented<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Instrumented {
            inner,
            plugins: Arc::clone(&self.plugins),
        }
    }
}

/// Service that fires plugin hooks around each call.
#[derive(Clone)]
pub struct Instrumented<S> {
    inner: S,
    plugins: PluginList,
}

impl<S: fmt::Debug> fmt::Debug for Instrumented<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("inner", &self.inner)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

impl<S> Service<HttpRequest> for Instrumented<S>
where
    S: Service<HttpRequest, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let method = request.method();
        let url = request.url().clone();
        let span = info_span!("http_request", %method, %url);

        // Call the instance that was polled ready, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let plugins = Arc::clone(&self.plugins);

        Box::pin(
            async move {
                for plugin in plugins.iter() {
                    plugin.will_send(&request);
                }

                let pending = PendingCall {
                    plugins,
                    method,
                    url,
                    started: Instant::now(),
                    span: Span::current(),
                    done: false,
                };

                let result = inner.call(request).await;
                pending.complete(&result);

                result
            }
            .instrument(span),
        )
    }
}

/// A sent call whose post-receive hooks have not fired yet.
///
/// Fires them on [`complete`](Self::complete), or with [`Error::Cancelled`]
/// when dropped first.
struct PendingCall {
    plugins: PluginList,
    method: Method,
    url: Url,
    started: Instant,
    span: Span,
    done: bool,
}

impl PendingCall {
    fn complete(mut self, result: &Result<Response>) {
        self.done = true;
        self.fire(result);
    }

    fn fire(&self, result: &Result<Response>) {
        let received =
            Received::new(self.method, &self.url, result).with_elapsed(self.started.elapsed());
        for plugin in self.plugins.iter() {
            plugin.did_receive(&received);
        }
    }
}

impl Drop for PendingCall {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let _entered = self.span.enter();
        self.fire(&Err(Error::Cancelled));
    }
}
