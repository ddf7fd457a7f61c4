//! # typebind core
//!
//! Core traits and types shared by every typebind crate.
//!
//! ## Core Concepts
//!
//! - **State**: Data owned by a feature (for a remote call, a [`RequestState`])
//! - **Action**: All possible inputs to a reducer (user intents and call outcomes)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (clients, callbacks, captured inputs)
//!
//! ## Example
//!
//! ```ignore
//! use typebind_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for LookupReducer {
//!     type State = RequestState<LookupError, Lookup>;
//!     type Action = LookupAction;
//!     type Environment = LookupEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Self::State,
//!         action: LookupAction,
//!         env: &LookupEnvironment,
//!     ) -> SmallVec<[Effect<LookupAction>; 4]> {
//!         match action {
//!             LookupAction::Start => {
//!                 *state = RequestState::InProgress;
//!                 smallvec![env.lookup_effect()]
//!             }
//!             LookupAction::Settled(outcome) => {
//!                 *state = RequestState::from(outcome);
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Lifecycle of a single asynchronous request
pub mod request;

pub use request::RequestState;

/// Reducer module - The core trait for business logic
///
/// Reducers are functions: `(State, Action, Environment) → (State, Effects)`
///
/// They hold the state-machine logic of a feature and never perform I/O
/// directly; I/O is described as an [`Effect`](crate::effect::Effect).
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most reducers return a
        /// single effect, so the inline capacity avoids heap allocation.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, returned from reducers and executed by the Store.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Whether this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}
