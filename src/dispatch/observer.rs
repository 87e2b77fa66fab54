use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::request::Operation;

/// Dispatch events emitted around request execution.
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    RequestReceived {
        operation: Operation,
    },
    RequestCompleted {
        operation: Operation,
        elapsed: Duration,
    },
    RequestFailed {
        operation: Operation,
        error: String,
    },
}

/// Observer hook for dispatch events.
pub trait DispatchObserver: Send + Sync {
    fn on_event(&self, event: &DispatchEvent);
}

/// A simple stderr logger for dispatch events.
#[derive(Default)]
pub struct StdErrDispatchObserver;

impl DispatchObserver for StdErrDispatchObserver {
    fn on_event(&self, event: &DispatchEvent) {
        eprintln!("{event:?}");
    }
}

/// Real-time counters for dispatched requests.
///
/// The dispatcher updates these during execution; callers can snapshot them
/// at any time via [`DispatchMetrics::snapshot`].
pub struct DispatchMetrics {
    dispatched: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    last_elapsed_ns: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            last_elapsed_ns: AtomicU64::new(0),
        }
    }

    pub fn on_dispatched(&self) {
        let _ = self.dispatched.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_completed(&self, elapsed: Duration) {
        let _ = self.completed.fetch_add(1, Ordering::SeqCst);
        self.last_elapsed_ns.store(
            elapsed.as_nanos().min(u64::MAX as u128) as u64,
            Ordering::SeqCst,
        );
    }

    pub fn on_failed(&self) {
        let _ = self.failed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> DispatchMetricsSnapshot {
        let last_elapsed_ns = self.last_elapsed_ns.load(Ordering::SeqCst);
        DispatchMetricsSnapshot {
            dispatched: self.dispatched.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            last_elapsed: if last_elapsed_ns > 0 {
                Some(Duration::from_nanos(last_elapsed_ns))
            } else {
                None
            },
        }
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`DispatchMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchMetricsSnapshot {
    pub dispatched: u64,
    pub completed: u64,
    pub failed: u64,
    pub last_elapsed: Option<Duration>,
}

impl fmt::Display for DispatchMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dispatched={}, completed={}, failed={}, last_elapsed={:?}",
            self.dispatched, self.completed, self.failed, self.last_elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DispatchMetrics;
    use std::time::Duration;

    #[test]
    fn counters_accumulate_and_snapshot() {
        let m = DispatchMetrics::new();
        m.on_dispatched();
        m.on_dispatched();
        m.on_completed(Duration::from_millis(3));
        m.on_failed();

        let snap = m.snapshot();
        assert_eq!(snap.dispatched, 2);
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.last_elapsed, Some(Duration::from_millis(3)));
    }

    #[test]
    fn fresh_metrics_have_no_elapsed() {
        assert_eq!(DispatchMetrics::new().snapshot().last_elapsed, None);
    }
}
