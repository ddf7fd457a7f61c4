//! Mock bind-type client for testing.

use crate::environment::BindTypeClient;
use crate::error::BindTypeError;
use crate::types::{BindTypeRequest, BindTypeResponse};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

type Outcome = Result<BindTypeResponse, BindTypeError>;

/// Mock bind-type client.
///
/// Answers calls from a script of outcomes, in order. When the script runs
/// out, calls fail with [`BindTypeError::Transport`].
///
/// A gated mock holds every call open until the test releases it, which
/// makes the `InProgress` window observable.
///
/// # Example
///
/// ```
/// use typebind_add_type::mocks::MockBindTypeClient;
/// use typebind_add_type::{BindTypeError, UserErrorResponse};
///
/// let client = MockBindTypeClient::new().with_outcome(Err(BindTypeError::Rejected(
///     UserErrorResponse { code: "TYPE_ERROR".into(), message: "no".into() },
/// )));
/// assert_eq!(client.remaining(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockBindTypeClient {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<BindTypeRequest>>,
    gate: Option<Semaphore>,
}

impl MockBindTypeClient {
    /// Create a mock with an empty script that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome to the script.
    #[must_use]
    pub fn with_outcome(self, outcome: Outcome) -> Self {
        lock(&self.outcomes).push_back(outcome);
        self
    }

    /// Hold every call until [`release`](Self::release) lets it through.
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    /// Let `calls` held calls settle, oldest first.
    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<BindTypeRequest> {
        lock(&self.requests).clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of scripted outcomes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock(&self.outcomes).len()
    }

    fn next_outcome(&self, request: BindTypeRequest) -> Outcome {
        lock(&self.requests).push(request);
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| Err(BindTypeError::Transport("no scripted outcome".to_string())))
    }
}

impl BindTypeClient for MockBindTypeClient {
    fn bind_type(&self, request: BindTypeRequest) -> impl Future<Output = Outcome> + Send {
        // Outcomes are assigned in call order, before the gate is awaited.
        let outcome = self.next_outcome(request);

        async move {
            if let Some(gate) = &self.gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }
            outcome
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
