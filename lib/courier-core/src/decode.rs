//! Turning raw bodies into typed values.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{Error, Result, from_json};

/// Stateless body decoder.
///
/// Implementations must be shareable across concurrent decode calls.
pub trait Decoder: Send + Sync {
    /// Decode a present body into `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Decode an optional body into `T`.
    ///
    /// An absent body fails with [`Error::InvalidResponse`] without
    /// attempting to decode anything.
    fn decode_and_complete<T: DeserializeOwned>(&self, body: Option<Bytes>) -> Result<T> {
        match body {
            Some(bytes) => self.decode(&bytes),
            None => Err(Error::InvalidResponse),
        }
    }
}

/// JSON decoder with path-aware errors.
///
/// Required fields are strict, `Option` fields may be missing, unknown fields
/// are ignored (serde's defaults).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        from_json(bytes)
    }
}

/// Decode an optional JSON body with [`JsonDecoder`].
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use courier_core::{Error, decode_and_complete};
///
/// let value: serde_json::Value = decode_and_complete(Some(Bytes::from_static(b"[1,2]"))).unwrap();
/// assert_eq!(value, serde_json::json!([1, 2]));
///
/// let err = decode_and_complete::<serde_json::Value>(None).unwrap_err();
/// assert_eq!(err, Error::InvalidResponse);
/// ```
pub fn decode_and_complete<T: DeserializeOwned>(body: Option<Bytes>) -> Result<T> {
    JsonDecoder.decode_and_complete(body)
}
