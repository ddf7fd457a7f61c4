//! Reducer for the add-type lifecycle.

use crate::actions::AddTypeAction;
use crate::environment::{AddTypeEnvironment, BindTypeClient};
use crate::types::AddTypeState;
use std::marker::PhantomData;
use typebind_core::{
    effect::Effect, reducer::Reducer, request_effect, smallvec, RequestState, SmallVec,
};

/// Reducer driving one add-type request through its lifecycle.
///
/// - `Trigger` moves to `InProgress` and starts the bind-type call.
/// - A failed call moves to `Failed`, carrying the error untouched.
/// - A successful call first hands the new project to the environment's
///   updater, then moves to `Completed`.
///
/// Generic over the client type `C` so tests can swap in a mock.
pub struct AddTypeReducer<C> {
    _client: PhantomData<fn() -> C>,
}

impl<C> AddTypeReducer<C> {
    /// Create a new add-type reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _client: PhantomData,
        }
    }
}

impl<C> Default for AddTypeReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for AddTypeReducer<C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for AddTypeReducer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AddTypeReducer")
    }
}

impl<C: BindTypeClient + 'static> Reducer for AddTypeReducer<C> {
    type State = AddTypeState;
    type Action = AddTypeAction;
    type Environment = AddTypeEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AddTypeAction::Trigger => {
                if state.is_in_progress() {
                    // Not guarded: both calls run and the later one to settle wins.
                    tracing::warn!(
                        project = %env.project_hash(),
                        "bind-type triggered while a previous call is outstanding"
                    );
                }

                tracing::debug!(
                    project = %env.project_hash(),
                    previous = state.label(),
                    "bind-type started"
                );
                *state = RequestState::InProgress;

                let client = env.client();
                let request = env.request();
                smallvec![request_effect! {
                    call: client.bind_type(request),
                    on_settled: AddTypeAction::BindTypeResponded
                }]
            },

            AddTypeAction::BindTypeResponded(Err(error)) => {
                tracing::warn!(project = %env.project_hash(), %error, "bind-type failed");
                *state = RequestState::Failed(error);
                smallvec![Effect::None]
            },

            AddTypeAction::BindTypeResponded(Ok(response)) => {
                let hashes = response.bound_expression_hashes();
                let (project, added) = response.into_parts();

                tracing::debug!(
                    project = %env.project_hash(),
                    new_project = %project.hash,
                    generated = hashes.len(),
                    "bind-type succeeded, updating project"
                );
                env.update_project(project, hashes);

                *state = RequestState::Completed(added);
                smallvec![Effect::None]
            },
        }
    }
}
