//! The transport contract.
//!
//! A [`Transport`] takes a [`Request`] model through the wire and back:
//! plugin hooks fire around the call, the request's validation rules run
//! against the response, and the raw body comes out on success.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Result};

/// Future returned by [`Transport::send`].
///
/// Resolves to the raw body, `None` when the response had no body.
pub type SendFuture = Pin<Box<dyn Future<Output = Result<Option<Bytes>>> + Send + 'static>>;

/// Executes requests and validates their responses.
///
/// Implementations are interchangeable at runtime behind
/// `Arc<dyn Transport>`: one backed by the network, one by canned fixtures.
///
/// The returned future resolves exactly once:
///
/// - `Err` with a transport error when no response was received,
/// - `Err` with the first failing validation rule's error,
/// - `Ok` with the body otherwise.
pub trait Transport: Send + Sync {
    /// Send a request.
    fn send(&self, request: Request) -> SendFuture;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: Request) -> SendFuture {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> SendFuture {
        (**self).send(request)
    }
}
