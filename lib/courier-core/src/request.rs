//! The request model.
//!
//! A [`Request`] describes an outbound call before it hits the wire: target,
//! method, JSON parameters, headers, and the validation rules the response has
//! to pass. Rules are attached with [`Request::validate`] and friends; they can
//! only be appended, never removed or reordered.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use courier_core::{Method, Request};
//! use serde_json::json;
//!
//! let params = json!({ "loginId": "+4512345678", "oneTimePassword": "1234" });
//! let request = Request::new(
//!     Method::Post,
//!     "https://api.example.com/login".parse().unwrap(),
//!     HashMap::new(),
//! )
//! .parameters_from(&params)
//! .validate(200..=299);
//!
//! assert_eq!(request.validations().len(), 1);
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::{HttpRequest, Method, StatusCodes, ValidationRule, Validations};

/// Request body parameters: a JSON object of name to JSON value.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Request headers: header name to value.
pub type Headers = HashMap<String, String>;

/// An outbound call with its response validation rules.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: Url,
    parameters: Option<Parameters>,
    headers: Headers,
    validations: Validations,
}

impl Request {
    /// Create a request without parameters or validation rules.
    #[must_use]
    pub fn new(method: Method, target: Url, headers: Headers) -> Self {
        Self {
            method,
            target,
            parameters: None,
            headers,
            validations: Validations::default(),
        }
    }

    /// Set the body parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set the body parameters from any serializable value.
    ///
    /// Values that fail to serialize, or that are not JSON objects, leave the
    /// request without a body.
    #[must_use]
    pub fn parameters_from<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.parameters = match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };
        self
    }

    /// Set a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a rule accepting only the given status codes.
    #[must_use]
    pub fn validate(self, codes: impl Into<StatusCodes>) -> Self {
        self.validate_with(ValidationRule::status(codes))
    }

    /// Append a rule accepting only 2xx status codes.
    #[must_use]
    pub fn validate_success(self) -> Self {
        self.validate(StatusCodes::success())
    }

    /// Append a custom rule.
    #[must_use]
    pub fn validate_with(mut self, rule: ValidationRule) -> Self {
        self.validations.push(rule);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL.
    #[must_use]
    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Body parameters.
    #[must_use]
    pub const fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Attached validation rules, in attachment order.
    #[must_use]
    pub fn validations(&self) -> &[ValidationRule] {
        self.validations.rules()
    }

    /// Split into the wire request and the validation rules.
    ///
    /// Method and headers are copied verbatim. Parameters become a JSON body;
    /// if they cannot be serialized the wire request carries no body.
    #[must_use]
    pub fn into_wire(self) -> (HttpRequest, Validations) {
        let body = self
            .parameters
            .and_then(|parameters| serde_json::to_vec(&parameters).ok())
            .map(Bytes::from);

        let request = HttpRequest::builder(self.method, self.target)
            .headers(self.headers)
            .body(body)
            .build();

        (request, self.validations)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn target() -> Url {
        Url::parse("https://api.example.com/login").expect("valid URL")
    }

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn wire_request_copies_method_and_headers() {
        let mut headers = Headers::new();
        headers.insert("X-Api-Key".to_string(), "secret".to_string());

        let (wire, validations) = Request::new(Method::Put, target(), headers).into_wire();

        check!(wire.method() == Method::Put);
        check!(wire.url() == &target());
        check!(wire.header("X-Api-Key") == Some("secret"));
        check!(wire.body().is_none());
        check!(validations.is_empty());
    }

    #[test]
    fn parameters_become_json_body() {
        let params = json!({ "loginId": "+4512345678", "oneTimePassword": "1234" });
        let (wire, _) = Request::new(Method::Post, target(), Headers::new())
            .parameters_from(&params)
            .into_wire();

        let_assert!(Some(body) = wire.body());
        let decoded: serde_json::Value = serde_json::from_slice(body).expect("json body");
        check!(decoded == params);
    }

    #[test]
    fn unserializable_parameters_are_dropped() {
        let request =
            Request::new(Method::Post, target(), Headers::new()).parameters_from(&Unserializable);
        check!(request.parameters().is_none());

        let (wire, _) = request.into_wire();
        check!(wire.body().is_none());
    }

    #[test]
    fn non_object_parameters_are_dropped() {
        let request = Request::new(Method::Post, target(), Headers::new())
            .parameters_from(&json!(["not", "an", "object"]));
        check!(request.parameters().is_none());
    }

    #[test]
    fn validate_appends_rules_in_order() {
        let request = Request::new(Method::Get, target(), Headers::new())
            .validate(200..=299)
            .validate_with(ValidationRule::content_type("application/json"))
            .validate_success();

        let names: Vec<_> = request.validations().iter().map(ValidationRule::name).collect();
        check!(names == ["status", "content-type", "status"]);

        let (_, validations) = request.into_wire();
        check!(validations.len() == 3);
    }
}
