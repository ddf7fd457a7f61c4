//! Lifecycle state for one asynchronous request.
//!
//! [`RequestState`] is the value a feature keeps for a remote call it drives.
//! Exactly one variant is active at a time:
//!
//! ```text
//! Uninitiated --start--> InProgress --(error)---> Failed
//!                        InProgress --(success)-> Completed
//! Failed / Completed --start--> InProgress
//! ```
//!
//! Only the owning reducer performs transitions. Everything else (renderers,
//! CLIs, tests) reads the value by pattern matching or through the query
//! helpers below.

use serde::{Deserialize, Serialize};

/// State of a single asynchronous request.
///
/// # Type Parameters
///
/// - `E`: The structured error value carried by [`RequestState::Failed`]
/// - `T`: The structured result value carried by [`RequestState::Completed`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RequestState<E, T> {
    /// No attempt has been made yet
    #[default]
    Uninitiated,

    /// A call is outstanding
    InProgress,

    /// The call completed with a reported failure
    Failed(E),

    /// The call completed successfully
    Completed(T),
}

impl<E, T> RequestState<E, T> {
    /// No attempt has been made yet.
    #[must_use]
    pub const fn is_uninitiated(&self) -> bool {
        matches!(self, Self::Uninitiated)
    }

    /// A call is outstanding.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// The last call failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The last call succeeded.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The last call has settled, either way.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Completed(_))
    }

    /// Result payload, if the last call succeeded.
    #[must_use]
    pub const fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Error payload, if the last call failed.
    #[must_use]
    pub const fn failed(&self) -> Option<&E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short variant name for logs and terminal output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Uninitiated => "uninitiated",
            Self::InProgress => "in_progress",
            Self::Failed(_) => "failed",
            Self::Completed(_) => "completed",
        }
    }
}

/// A settled outcome maps directly onto a terminal variant.
impl<E, T> From<Result<T, E>> for RequestState<E, T> {
    fn from(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => Self::Completed(value),
            Err(error) => Self::Failed(error),
        }
    }
}
