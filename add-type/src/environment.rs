//! Dependencies of the add-type reducer.

use crate::error::BindTypeError;
use crate::types::{BindTypeRequest, BindTypeResponse, ExprHash, ProjectData, ProjectHash};
use std::future::Future;
use std::sync::Arc;

/// The remote bind-type operation.
///
/// Production uses `HttpBindTypeClient`, tests use `MockBindTypeClient`.
pub trait BindTypeClient: Send + Sync {
    /// Bind a type declaration into a project.
    ///
    /// # Errors
    ///
    /// Returns the failure value for any outcome other than a successful
    /// bind: server rejections, transport failures, unreadable responses.
    fn bind_type(
        &self,
        request: BindTypeRequest,
    ) -> impl Future<Output = Result<BindTypeResponse, BindTypeError>> + Send;
}

/// Pushes a freshly bound project to whoever owns project state.
///
/// Called with the new project snapshot and the expression hashes of the
/// generated bindings. Runs inside the state transition, so it must return
/// promptly and must not call back into the controller.
pub type ProjectUpdater = Arc<dyn Fn(ProjectData, Vec<ExprHash>) + Send + Sync>;

/// Environment for the add-type reducer.
///
/// Everything here is captured once, when the controller is built, and
/// stays fixed for its lifetime.
pub struct AddTypeEnvironment<C> {
    client: Arc<C>,
    project_hash: ProjectHash,
    code: String,
    update_project: ProjectUpdater,
}

impl<C: BindTypeClient> AddTypeEnvironment<C> {
    /// Create a new environment.
    #[must_use]
    pub fn new(
        client: Arc<C>,
        project_hash: ProjectHash,
        code: impl Into<String>,
        update_project: ProjectUpdater,
    ) -> Self {
        Self {
            client,
            project_hash,
            code: code.into(),
            update_project,
        }
    }

    /// Shared handle to the bind-type client.
    #[must_use]
    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    /// Project every call targets.
    #[must_use]
    pub const fn project_hash(&self) -> &ProjectHash {
        &self.project_hash
    }

    /// Request body submitted on every trigger.
    #[must_use]
    pub fn request(&self) -> BindTypeRequest {
        BindTypeRequest {
            project_hash: self.project_hash.clone(),
            expression: self.code.clone(),
        }
    }

    /// Hand a bound project to its owner.
    pub fn update_project(&self, project: ProjectData, hashes: Vec<ExprHash>) {
        (self.update_project)(project, hashes);
    }
}

impl<C> Clone for AddTypeEnvironment<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            project_hash: self.project_hash.clone(),
            code: self.code.clone(),
            update_project: Arc::clone(&self.update_project),
        }
    }
}
