//! JSON body serialization utilities.

use bytes::Bytes;

use crate::{Error, Result};

/// Content type for JSON request and response bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use courier_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { login_id: String }
///
/// let login = Login { login_id: "+4512345678".to_string() };
/// let bytes = to_json(&login).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"login_id":"+4512345678"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| Error::invalid_request(format!("JSON serialization error: {e}")))
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// (e.g. `permissions[2]`).
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Token { token: String }
///
/// let token: Token = from_json(br#"{"token":"abc"}"#).expect("deserialize");
/// assert_eq!(token, Token { token: "abc".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
}
