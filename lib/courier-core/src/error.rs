//! Error types for the request pipeline.
//!
//! Failures fall into three stages, each surfaced unchanged to the caller:
//!
//! - transport: [`Error::Connection`], [`Error::Tls`], [`Error::InvalidRequest`],
//!   [`Error::InvalidUrl`], [`Error::FixtureNotFound`], [`Error::Cancelled`]
//! - validation: [`Error::UnacceptableStatusCode`], [`Error::UnacceptableContentType`]
//! - decoding: [`Error::InvalidResponse`], [`Error::Decode`]

use derive_more::{Display, Error, From};

use crate::Method;

/// Main error type for courier operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The wire request could not be built.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The fixture transport has no canned response for this call.
    #[display("no fixture for {method} {path}")]
    #[from(skip)]
    FixtureNotFound {
        /// Method of the unmatched request.
        method: Method,
        /// URL path of the unmatched request.
        path: String,
    },

    /// The call was dropped before it completed.
    #[display("request cancelled")]
    #[from(skip)]
    Cancelled,

    /// A validation rule rejected the received status code.
    #[display("unacceptable status code: {code}")]
    #[from(skip)]
    UnacceptableStatusCode {
        /// The status code that was received.
        code: u16,
    },

    /// A validation rule rejected the received `Content-Type`.
    #[display("unacceptable content type: {}", actual.as_deref().unwrap_or("<none>"))]
    #[from(skip)]
    UnacceptableContentType {
        /// The content type the rule accepts.
        expected: String,
        /// The content type that was received, if any.
        actual: Option<String>,
    },

    /// A body was expected but none was received.
    #[display("invalid response")]
    #[from(skip)]
    InvalidResponse,

    /// The body did not match the expected shape.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the failing field (e.g. `user.address.city`).
        path: String,
        /// Error message.
        message: String,
    },
}

/// Outcome of every pipeline stage.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an unacceptable status code error.
    #[must_use]
    pub const fn unacceptable_status_code(code: u16) -> Self {
        Self::UnacceptableStatusCode { code }
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if the call failed before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_)
                | Self::Tls(_)
                | Self::InvalidRequest(_)
                | Self::InvalidUrl(_)
                | Self::FixtureNotFound { .. }
                | Self::Cancelled
        )
    }

    /// Returns `true` if a validation rule rejected the response.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnacceptableStatusCode { .. } | Self::UnacceptableContentType { .. }
        )
    }

    /// Returns `true` if the body could not be turned into a value.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::InvalidResponse | Self::Decode { .. })
    }

    /// The rejected status code, for validation errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnacceptableStatusCode { code } => Some(*code),
            _ => None,
        }
    }
}
