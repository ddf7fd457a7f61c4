//! Recording double for injected callbacks
//!
//! Features receive side-effect capabilities as plain functions. Tests hand
//! them a closure that forwards into a [`CallRecorder`] and then assert on
//! what was captured.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Captures every invocation of a callback, in call order.
///
/// Clones share the same log, so one clone can live inside the closure given
/// to the code under test while another stays with the test.
///
/// # Example
///
/// ```
/// use typebind_testing::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// let sink = recorder.clone();
/// let callback = move |a: u32, b: &str| sink.record((a, b.to_string()));
///
/// callback(1, "one");
/// assert_eq!(recorder.calls(), vec![(1, "one".to_string())]);
/// ```
#[derive(Debug)]
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> CallRecorder<T> {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record one invocation
    pub fn record(&self, call: T) {
        self.lock().push(call);
    }

    /// Number of recorded invocations
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the callback was never invoked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every recorded invocation
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panicking test thread must not hide the calls recorded before it.
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> CallRecorder<T> {
    /// Snapshot of every recorded invocation, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<T> {
        self.lock().clone()
    }

    /// The most recent invocation, if any
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.lock().last().cloned()
    }
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for CallRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
