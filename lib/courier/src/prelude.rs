//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ApiConfig, ApiContext, Decoder, Error, Fixture, FixtureTransport, Fixtures, Headers,
    HyperTransport, JsonDecoder, Method, Parameters, Plugin, Received, Request, Result,
    StatusCodes, Transport, ValidationRule, decode_and_complete,
};
pub use serde::{Deserialize, Serialize};
