//! Network activity indicator.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tracing::warn;

use crate::{HttpRequest, Plugin, Received};

type Listener = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    started: AtomicU64,
    finished: AtomicU64,
}

/// Shared "network busy" indicator.
///
/// Counts requests in flight. The count never goes below zero: an unpaired
/// [`end`](Self::end) is ignored. The optional listener is told when the
/// indicator turns busy (`true`) and idle again (`false`).
///
/// Cloning gives another handle on the same counters.
#[derive(Clone, Default)]
pub struct ActivityIndicator {
    counters: Arc<Counters>,
    listener: Option<Listener>,
}

impl ActivityIndicator {
    /// Create an idle indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an indicator calling `listener` whenever it turns busy or idle.
    #[must_use]
    pub fn with_listener(listener: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self {
            counters: Arc::default(),
            listener: Some(Arc::new(listener)),
        }
    }

    /// A request started.
    pub fn begin(&self) {
        self.counters.started.fetch_add(1, Ordering::Relaxed);
        let previous = self.counters.in_flight.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            self.notify(true);
        }
    }

    /// A request finished.
    pub fn end(&self) {
        let updated = self
            .counters
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match updated {
            Ok(previous) => {
                self.counters.finished.fetch_add(1, Ordering::Relaxed);
                if previous == 1 {
                    self.notify(false);
                }
            }
            Err(_) => warn!("activity indicator ended without a matching begin"),
        }
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::Acquire)
    }

    /// Returns `true` while at least one request is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.in_flight() > 0
    }

    /// Total number of started requests.
    #[must_use]
    pub fn started(&self) -> u64 {
        self.counters.started.load(Ordering::Relaxed)
    }

    /// Total number of finished requests.
    #[must_use]
    pub fn finished(&self) -> u64 {
        self.counters.finished.load(Ordering::Relaxed)
    }

    fn notify(&self, active: bool) {
        if let Some(listener) = &self.listener {
            listener(active);
        }
    }
}

impl fmt::Debug for ActivityIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityIndicator")
            .field("in_flight", &self.in_flight())
            .field("started", &self.started())
            .field("finished", &self.finished())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Plugin driving an [`ActivityIndicator`].
///
/// Every pre-send hook is paired with exactly one post-receive hook, transport
/// errors included, so the indicator always returns to idle.
#[derive(Debug, Clone, Default)]
pub struct ActivityPlugin {
    indicator: ActivityIndicator,
}

impl ActivityPlugin {
    /// Create a plugin driving `indicator`.
    #[must_use]
    pub fn new(indicator: ActivityIndicator) -> Self {
        Self { indicator }
    }

    /// The driven indicator.
    #[must_use]
    pub fn indicator(&self) -> &ActivityIndicator {
        &self.indicator
    }
}

impl Plugin for ActivityPlugin {
    fn will_send(&self, _request: &HttpRequest) {
        self.indicator.begin();
    }

    fn did_receive(&self, _received: &Received<'_>) {
        self.indicator.end();
    }
}
