//! Controller owning one add-type request.

use crate::actions::AddTypeAction;
use crate::environment::{AddTypeEnvironment, BindTypeClient};
use crate::reducer::AddTypeReducer;
use crate::types::{AddTypeState, ExprHash, ProjectData, ProjectHash};
use std::sync::Arc;
use typebind_runtime::Store;

type AddTypeStore<C> = Store<AddTypeState, AddTypeAction, AddTypeEnvironment<C>, AddTypeReducer<C>>;

/// Drives a bind-type call for one project and expression.
///
/// The controller is the only writer of its [`AddTypeState`]; callers read
/// it through [`state`](Self::state) or [`observe`](Self::observe). Clones
/// share the same state.
///
/// # Example
///
/// ```ignore
/// let controller = AddTypeController::new(
///     ProjectHash::new("abc123"),
///     "type Maybe a = Just a | Nothing",
///     Arc::new(HttpBindTypeClient::from_env()?),
///     |project, hashes| project_store.replace(project, hashes),
/// );
///
/// controller.trigger().await;
/// match controller.state().await {
///     RequestState::Completed(added) => render(&added),
///     RequestState::Failed(error) => show_error(&error),
///     _ => {}
/// }
/// ```
pub struct AddTypeController<C: BindTypeClient + 'static> {
    store: AddTypeStore<C>,
}

impl<C: BindTypeClient + 'static> AddTypeController<C> {
    /// Create a controller in the `Uninitiated` state.
    ///
    /// # Arguments
    ///
    /// - `project_hash`: Project every call targets
    /// - `code`: Type declaration submitted on every call
    /// - `client`: The bind-type operation
    /// - `update_project`: Receives the new project and the generated
    ///   expression hashes after each successful call, before the state
    ///   becomes `Completed`
    #[must_use]
    pub fn new<F>(
        project_hash: ProjectHash,
        code: impl Into<String>,
        client: Arc<C>,
        update_project: F,
    ) -> Self
    where
        F: Fn(ProjectData, Vec<ExprHash>) + Send + Sync + 'static,
    {
        let env = AddTypeEnvironment::new(client, project_hash, code, Arc::new(update_project));

        Self {
            store: Store::new(AddTypeState::default(), AddTypeReducer::new(), env),
        }
    }

    /// Run one bind-type call to completion.
    ///
    /// The state is `InProgress` as soon as the call starts and terminal
    /// when this returns. Failures are never returned: they end up in the
    /// `Failed` state.
    #[tracing::instrument(skip(self), name = "add_type_trigger")]
    pub async fn trigger(&self) {
        let mut handle = self.store.send(AddTypeAction::Trigger).await;
        handle.wait().await;

        let outcome = self.store.state(|s| s.label()).await;
        tracing::info!(outcome, "bind-type settled");
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AddTypeState {
        self.store.state(|s| s.clone()).await
    }

    /// Read the current state without cloning it.
    pub async fn observe<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&AddTypeState) -> T,
    {
        self.store.state(f).await
    }
}

impl<C: BindTypeClient + 'static> Clone for AddTypeController<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
