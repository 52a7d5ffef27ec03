//! Tower middleware used by the transports.
//!
//! Both transports stack the same layers on top of their base service:
//!
//! - [`PluginLayer`] - fires [`Plugin`](crate::Plugin) hooks around every call
//!
//! The base service is the hyper client for [`HyperTransport`](crate::HyperTransport)
//! and the canned-response lookup for [`FixtureTransport`](crate::FixtureTransport).

mod instrument;

pub use instrument::{Instrumented, PluginLayer, PluginList};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
