//! Observer hooks around a transport call.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::{Error, HttpRequest, Method, Response, Result};

/// Observer notified before and after every transport call.
///
/// Plugins are held by a transport for its whole lifetime and shared by every
/// request it sends. They see the wire request right before transmission and
/// the raw outcome right after receipt, before validation and decoding. They
/// cannot change either and have no say in the outcome.
///
/// Both hooks default to doing nothing.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use courier_core::{Plugin, Received};
///
/// #[derive(Default)]
/// struct CountFailures(AtomicUsize);
///
/// impl Plugin for CountFailures {
///     fn did_receive(&self, received: &Received<'_>) {
///         if received.error().is_some() {
///             self.0.fetch_add(1, Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Called with the fully built wire request, immediately before it is sent.
    fn will_send(&self, request: &HttpRequest) {
        let _ = request;
    }

    /// Called once the call completed, whether a response arrived or not.
    ///
    /// A call dropped before completion reports [`Error::Cancelled`], so
    /// every pre-send hook is paired with exactly one post-receive hook.
    fn did_receive(&self, received: &Received<'_>) {
        let _ = received;
    }
}

impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn will_send(&self, request: &HttpRequest) {
        (**self).will_send(request);
    }

    fn did_receive(&self, received: &Received<'_>) {
        (**self).did_receive(received);
    }
}

/// What a plugin sees after a call: the request line and the raw result.
#[derive(Debug, Clone, Copy)]
pub struct Received<'a> {
    method: Method,
    url: &'a Url,
    result: &'a Result<Response>,
    elapsed: Duration,
}

impl<'a> Received<'a> {
    /// Create a view over a finished call.
    #[must_use]
    pub const fn new(method: Method, url: &'a Url, result: &'a Result<Response>) -> Self {
        Self {
            method,
            url,
            result,
            elapsed: Duration::ZERO,
        }
    }

    /// Set the time spent between the pre-send hooks and completion.
    #[must_use]
    pub const fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Method of the request that was sent.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL of the request that was sent.
    #[must_use]
    pub const fn url(&self) -> &'a Url {
        self.url
    }

    /// Time spent on the call, from the pre-send hooks to completion.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The received response, if the call produced one.
    #[must_use]
    pub fn response(&self) -> Option<&'a Response> {
        self.result.as_ref().ok()
    }

    /// Status code of the received response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }

    /// Raw received body; `None` when nothing (or nothing but an empty body) arrived.
    #[must_use]
    pub fn body(&self) -> Option<&'a Bytes> {
        self.response()
            .map(Response::body)
            .filter(|body| !body.is_empty())
    }

    /// The transport error, if the call failed before a response arrived.
    #[must_use]
    pub fn error(&self) -> Option<&'a Error> {
        self.result.as_ref().err()
    }
}
