//! Plugin-instrumented JSON request pipeline.
//!
//! Build a [`Request`] with its validation rules, send it through a
//! [`Transport`] that fires [`Plugin`] hooks around the call, then decode the
//! body into a typed value.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//! use courier::plugins::LoggingPlugin;
//!
//! let config = ApiConfig::builder()
//!     .base_url("https://api.example.com/v1")
//!     .api_key("secret")
//!     .build()?;
//! let transport = HyperTransport::builder()
//!     .plugin(LoggingPlugin::new())
//!     .build();
//! let api = ApiContext::new(config, transport);
//!
//! let session = api.login("+4512345678", "1234").await?;
//! ```
//!
//! Swap in a [`FixtureTransport`] to run without a network:
//!
//! ```ignore
//! api.use_transport(Arc::new(FixtureTransport::new(Fixtures::with_defaults()?)));
//! ```

pub mod api;
mod config;
mod connector;
pub mod middleware;
pub mod plugins;
pub mod prelude;
mod transport;

// Re-export the facade
pub use api::{ApiContext, endpoints, models};

// Re-export transports
pub use transport::{
    BoxedService, Fixture, FixtureTransport, FixtureTransportBuilder, Fixtures, HyperTransport,
    HyperTransportBuilder, ServiceFuture,
};

// Re-export configuration
pub use config::{
    API_KEY_HEADER, ApiConfig, ApiConfigBuilder, TransportConfig, TransportConfigBuilder,
};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    Decoder, Error, Headers, HttpRequest, HttpRequestBuilder, JSON_CONTENT_TYPE, JsonDecoder,
    Method, Parameters, Plugin, Received, Request, Response, ResponseHead, Result, SendFuture,
    StatusCodes, Transport, ValidationRule, Validations, decode_and_complete, from_json, to_json,
};

pub use url;
