//! # typebind testing
//!
//! Testing utilities and helpers for typebind reducers and stores.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Assertion helpers for effects
//! - [`CallRecorder`]: Captures invocations of injected callbacks
//! - [`init_test_tracing`]: Opt-in log output for test runs
//!
//! ## Example
//!
//! ```ignore
//! use typebind_testing::{CallRecorder, ReducerTest};
//!
//! let updates = CallRecorder::new();
//! let sink = updates.clone();
//! let env = test_environment(move |project, hashes| sink.record((project, hashes)));
//!
//! ReducerTest::new(AddTypeReducer::new())
//!     .with_env(env)
//!     .given_state(AddTypeState::InProgress)
//!     .when_action(AddTypeAction::BindTypeResponded(Ok(response)))
//!     .then_state(|state| assert!(state.is_completed()))
//!     .run();
//!
//! assert_eq!(updates.len(), 1);
//! ```

mod recorder;

pub use recorder::CallRecorder;
pub use reducer_test::{assertions, ReducerTest};

/// Install a `tracing` subscriber for the current test binary
///
/// Honors `RUST_LOG` and writes through the test writer so output is only
/// shown for failing tests. Safe to call from every test; only the first
/// call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
