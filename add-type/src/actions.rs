//! Actions for the add-type lifecycle.

use crate::error::BindTypeError;
use crate::types::BindTypeResponse;

/// Actions processed by the `AddTypeReducer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTypeAction {
    /// Start a bind-type call for the captured project and expression.
    ///
    /// Allowed from every state. A trigger while a call is outstanding
    /// starts a second call; whichever settles last decides the state.
    Trigger,

    /// The bind-type call settled.
    ///
    /// Produced by the effect started on `Trigger`, never by callers.
    BindTypeResponded(Result<BindTypeResponse, BindTypeError>),
}
