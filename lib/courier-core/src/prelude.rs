//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    Decoder, Error, Headers, HttpRequest, JsonDecoder, Method, Parameters, Plugin, Received,
    Request, Response, Result, StatusCodes, Transport, ValidationRule, decode_and_complete,
};
