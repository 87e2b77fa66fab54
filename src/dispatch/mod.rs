//! Compute dispatcher: routes typed requests to the four algorithms,
//! preferring an isolated worker-pool execution context and falling back to
//! synchronous in-place execution.
//!
//! Contract:
//!
//! - Each request owns its dataset and config (copy-in); the response is an
//!   independent value (copy-out). This holds on both execution paths, so
//!   concurrent requests can never observe each other's data.
//! - Every failure — unknown operation, decode error, algorithm error, or a
//!   panic inside an algorithm — resolves to a structured
//!   [`ComputeResponse::Failure`]; nothing escapes the dispatcher as an
//!   unhandled fault.
//! - Responses pair 1:1 with requests. No ordering is guaranteed across
//!   independent concurrent requests.
//! - Cancellation is best-effort: dropping a [`PendingResponse`] abandons
//!   the eventual response, but already-dispatched work runs to completion,
//!   and the synchronous path cannot be cancelled at all.

mod observer;
mod request;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::Instant;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde_json::{Value as JsonValue, json};

pub use observer::{
    DispatchEvent, DispatchMetrics, DispatchMetricsSnapshot, DispatchObserver,
    StdErrDispatchObserver,
};
pub use request::{ComputeOutput, ComputeRequest, ComputeResponse, Operation, parse_request};

use request::execute;

/// How the dispatcher executes requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Hand requests to an isolated worker pool; [`Dispatcher::dispatch`]
    /// returns before the computation finishes.
    #[default]
    Parallel,
    /// Run each request in place on the calling thread, with the same
    /// request/response contract.
    Synchronous,
}

/// Configuration for the [`Dispatcher`].
#[derive(Debug, Clone, Default)]
pub struct DispatcherOptions {
    /// Worker threads for [`ExecutionMode::Parallel`].
    ///
    /// If `None`, uses the platform's available parallelism. Ignored in
    /// synchronous mode.
    pub num_threads: Option<usize>,
    /// Execution mode.
    pub mode: ExecutionMode,
}

/// Routes compute requests to the four algorithms.
pub struct Dispatcher {
    pool: Option<ThreadPool>,
    observer: Option<Arc<dyn DispatchObserver>>,
    metrics: Arc<DispatchMetrics>,
}

impl Dispatcher {
    /// Create a dispatcher with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads == Some(0)` in parallel mode.
    pub fn new(opts: DispatcherOptions) -> Self {
        let pool = match opts.mode {
            ExecutionMode::Synchronous => None,
            ExecutionMode::Parallel => {
                if let Some(n) = opts.num_threads {
                    assert!(n > 0, "num_threads must be > 0 when set");
                }
                let n_threads = opts.num_threads.unwrap_or_else(|| {
                    std::thread::available_parallelism()
                        .map(|n| n.get())
                        .unwrap_or(1)
                });
                Some(
                    ThreadPoolBuilder::new()
                        .num_threads(n_threads)
                        .build()
                        .expect("failed to build dispatch thread pool"),
                )
            }
        };

        Self {
            pool,
            observer: None,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    /// Attach an observer for dispatch events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time dispatch metrics.
    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Dispatch a request, taking ownership of its dataset and config.
    ///
    /// In parallel mode this returns immediately and the computation runs
    /// on the worker pool; in synchronous mode the returned
    /// [`PendingResponse`] is already resolved. Either way,
    /// [`PendingResponse::wait`] yields exactly one response.
    pub fn dispatch(&self, request: ComputeRequest) -> PendingResponse {
        let operation = request.operation();
        self.metrics.on_dispatched();
        self.emit(DispatchEvent::RequestReceived { operation });

        let (tx, rx) = channel();
        let ctx = RunContext {
            metrics: Arc::clone(&self.metrics),
            observer: self.observer.clone(),
        };

        match &self.pool {
            Some(pool) => {
                pool.spawn(move || {
                    // A dropped PendingResponse closes the receiver; the
                    // abandoned response is simply discarded.
                    let _ = tx.send(ctx.run(operation, request));
                });
            }
            None => {
                let _ = tx.send(ctx.run(operation, request));
            }
        }

        PendingResponse { rx }
    }

    /// Dispatch and wait for the response.
    pub fn dispatch_blocking(&self, request: ComputeRequest) -> ComputeResponse {
        self.dispatch(request).wait()
    }

    /// Handle a wire-shaped JSON request value, returning the wire-shaped
    /// JSON response: `{ operation, result }` or `{ error }`.
    pub fn handle_value(&self, request: JsonValue) -> JsonValue {
        let typed = match parse_request(request) {
            Ok(typed) => typed,
            Err(e) => return json!({ "error": e.to_string() }),
        };

        let response = self.dispatch_blocking(typed);
        serde_json::to_value(&response)
            .unwrap_or_else(|e| json!({ "error": format!("failed to encode response: {e}") }))
    }

    /// Handle a JSON request string; see [`Dispatcher::handle_value`].
    pub fn handle_json(&self, request: &str) -> String {
        let value = match serde_json::from_str::<JsonValue>(request) {
            Ok(value) => value,
            Err(e) => return json!({ "error": format!("invalid request: {e}") }).to_string(),
        };
        self.handle_value(value).to_string()
    }

    fn emit(&self, event: DispatchEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherOptions::default())
    }
}

/// Handle to a response that may still be computing.
///
/// Dropping it abandons the response; the dispatched work (if any) still
/// runs to completion.
pub struct PendingResponse {
    rx: Receiver<ComputeResponse>,
}

impl PendingResponse {
    /// Block until the response arrives.
    pub fn wait(self) -> ComputeResponse {
        self.rx.recv().unwrap_or_else(|_| {
            ComputeResponse::failure("compute worker disconnected before responding")
        })
    }
}

struct RunContext {
    metrics: Arc<DispatchMetrics>,
    observer: Option<Arc<dyn DispatchObserver>>,
}

impl RunContext {
    fn run(&self, operation: Operation, request: ComputeRequest) -> ComputeResponse {
        let start = Instant::now();

        let response = match catch_unwind(AssertUnwindSafe(|| execute(request))) {
            Ok(response) => response,
            Err(panic) => ComputeResponse::Failure {
                error: format!("computation panicked: {}", panic_message(panic.as_ref())),
            },
        };

        match &response {
            ComputeResponse::Success { .. } => {
                let elapsed = start.elapsed();
                self.metrics.on_completed(elapsed);
                self.emit(DispatchEvent::RequestCompleted { operation, elapsed });
            }
            ComputeResponse::Failure { error } => {
                self.metrics.on_failed();
                self.emit(DispatchEvent::RequestFailed {
                    operation,
                    error: error.clone(),
                });
            }
        }

        response
    }

    fn emit(&self, event: DispatchEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
