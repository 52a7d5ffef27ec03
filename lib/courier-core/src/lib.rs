//! Core types and traits for the courier request pipeline.
//!
//! This crate provides the runtime-agnostic half of courier:
//! - [`Request`] - request model with attached [`ValidationRule`]s
//! - [`HttpRequest`] and [`Response`] - wire-level request and response
//! - [`Plugin`] - observer hooks fired around every transport call
//! - [`Transport`] - the `send` contract implemented by the `courier` crate
//! - [`Decoder`] and [`decode_and_complete`] - raw body to typed value
//! - [`Error`] and [`Result`] - one error type for every pipeline stage
//!
//! A call flows through three stages, each of which can end it:
//!
//! ```text
//! Request ──▶ Transport::send ──▶ validation rules ──▶ Decoder ──▶ T
//!                  │                     │                 │
//!                  ▼                     ▼                 ▼
//!           transport error     unacceptable status   decode error
//! ```

mod body;
mod decode;
mod error;
mod http_request;
mod method;
mod plugin;
pub mod prelude;
mod request;
mod response;
mod transport;
mod validation;

pub use body::{JSON_CONTENT_TYPE, from_json, to_json};
pub use decode::{Decoder, JsonDecoder, decode_and_complete};
pub use error::{Error, Result};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use method::Method;
pub use plugin::{Plugin, Received};
pub use request::{Headers, Parameters, Request};
pub use response::Response;
pub use transport::{SendFuture, Transport};
pub use validation::{ResponseHead, StatusCodes, ValidationRule, Validations};
