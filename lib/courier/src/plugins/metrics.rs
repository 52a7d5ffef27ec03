//! Metrics plugin using the metrics crate facade.
//!
//! Records request metrics through the `metrics` crate, so any installed
//! recorder (Prometheus, `StatsD`, ...) picks them up.

use crate::{HttpRequest, Plugin, Received};

/// Labels used for metrics.
const LABEL_METHOD: &str = "method";
const LABEL_STATUS: &str = "status";

/// Metric names.
const METRIC_REQUESTS_TOTAL: &str = "http_client_requests_total";
const METRIC_ERRORS_TOTAL: &str = "http_client_errors_total";
const METRIC_REQUESTS_IN_FLIGHT: &str = "http_client_requests_in_flight";

/// Plugin recording HTTP metrics.
///
/// Records the following metrics:
/// - `http_client_requests_total` (counter): responses received, labeled by method and status
/// - `http_client_errors_total` (counter): transport errors, labeled by method
/// - `http_client_requests_in_flight` (gauge): number of requests currently in flight
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsPlugin {
    _private: (),
}

impl MetricsPlugin {
    /// Create a new metrics plugin.
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Plugin for MetricsPlugin {
    fn will_send(&self, _request: &HttpRequest) {
        metrics::gauge!(METRIC_REQUESTS_IN_FLIGHT).increment(1.0);
    }

    fn did_receive(&self, received: &Received<'_>) {
        metrics::gauge!(METRIC_REQUESTS_IN_FLIGHT).decrement(1.0);

        let method = received.method().as_str();
        match received.status() {
            Some(status) => {
                metrics::counter!(
                    METRIC_REQUESTS_TOTAL,
                    LABEL_METHOD => method,
                    LABEL_STATUS => status.to_string()
                )
                .increment(1);
            }
            None => {
                metrics::counter!(METRIC_ERRORS_TOTAL, LABEL_METHOD => method).increment(1);
            }
        }
    }
}
