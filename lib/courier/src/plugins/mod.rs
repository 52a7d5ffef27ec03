//! Reference plugins.
//!
//! - [`ActivityPlugin`] - keeps an [`ActivityIndicator`] busy while requests are in flight
//! - [`LoggingPlugin`] - writes `tracing` events for requests, responses and errors
//! - `MetricsPlugin` - records counters and an in-flight gauge (requires the `metrics` feature)
//!
//! Register them on a transport builder; hooks fire in registration order.
//!
//! ```ignore
//! use courier::plugins::{ActivityIndicator, ActivityPlugin, LoggingPlugin};
//!
//! let indicator = ActivityIndicator::new();
//! let transport = HyperTransport::builder()
//!     .plugin(ActivityPlugin::new(indicator.clone()))
//!     .plugin(LoggingPlugin::new())
//!     .build();
//! ```

mod activity;
mod logging;
#[cfg(feature = "metrics")]
mod metrics;

pub use activity::{ActivityIndicator, ActivityPlugin};
pub use logging::{LogLevel, LoggingPlugin};
#[cfg(feature = "metrics")]
pub use metrics::MetricsPlugin;
