//! Request/response logging plugin.
//!
//! Logs outbound requests and their outcome using the `tracing` crate. Events
//! are emitted inside the `http_request` span opened by the plugin layer.

use tracing::{debug, info, warn};

use crate::{Error, HttpRequest, Plugin, Received};

/// Headers whose value never reaches the logs.
const REDACTED_HEADERS: &[&str] = &["authorization", "x-api-key", "cookie"];

/// Log level for the logging plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (headers and body sizes).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Plugin logging every request and its outcome.
///
/// Completed calls log their status and elapsed time; non-2xx statuses and
/// transport errors are logged as warnings.
///
/// # Example
///
/// ```ignore
/// use courier::plugins::LoggingPlugin;
///
/// let transport = HyperTransport::builder()
///     .plugin(LoggingPlugin::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPlugin {
    level: LogLevel,
}

impl LoggingPlugin {
    /// Create a new logging plugin with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging plugin that also logs headers and body sizes.
    #[must_use]
    pub fn debug() -> Self {
        Self::with_level(LogLevel::Debug)
    }

    /// Create a logging plugin with the given level.
    #[must_use]
    pub const fn with_level(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

fn redacted_headers(request: &HttpRequest) -> Vec<(&str, &str)> {
    let mut headers: Vec<_> = request
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_HEADERS
                .iter()
                .any(|redacted| name.eq_ignore_ascii_case(redacted))
            {
                "<redacted>"
            } else {
                value.as_str()
            };
            (name.as_str(), value)
        })
        .collect();
    headers.sort_unstable();
    headers
}

impl Plugin for LoggingPlugin {
    fn will_send(&self, request: &HttpRequest) {
        let method = request.method();
        let url = request.url().as_str();

        match self.level {
            LogLevel::Debug => {
                debug!(
                    method = %method,
                    url = %url,
                    headers = ?redacted_headers(request),
                    body_len = request.body().map_or(0, bytes::Bytes::len),
                    "sending request"
                );
            }
            LogLevel::Info => {
                info!(method = %method, url = %url, "sending request");
            }
        }
    }

    fn did_receive(&self, received: &Received<'_>) {
        // Saturating conversion to u64
        let elapsed_ms = u64::try_from(received.elapsed().as_millis()).unwrap_or(u64::MAX);

        match received.error() {
            Some(Error::Cancelled) => {
                debug!(elapsed_ms, "request cancelled");
                return;
            }
            Some(err) => {
                warn!(error = %err, elapsed_ms, "request failed");
                return;
            }
            None => {}
        }

        let Some(response) = received.response() else {
            return;
        };
        let status = response.status();
        if self.level == LogLevel::Debug {
            debug!(status, body_len = response.body().len(), "response body received");
        }
        if response.is_success() {
            info!(status, elapsed_ms, "request completed");
        } else {
            warn!(status, elapsed_ms, "request failed with HTTP error");
        }
    }
}
