//! # Add Type
//!
//! Binds a type declaration into a project and tracks the request through
//! its lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! AddTypeController::trigger()
//!         ↓
//! AddTypeAction::Trigger → state = InProgress
//!         ↓
//! Effect: BindTypeClient::bind_type(project, code)
//!         ↓
//! AddTypeAction::BindTypeResponded(outcome)
//!         ├─ Err(e) → state = Failed(e)
//!         └─ Ok(r)  → update_project(r.project_data, generated hashes)
//!                     state = Completed(AddType)
//! ```
//!
//! The controller owns the [`AddTypeState`]. Callers read it, re-trigger
//! it, and never write it. Project state lives elsewhere and is only
//! reached through the `update_project` callback given at construction.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use typebind_add_type::{AddTypeController, HttpBindTypeClient, ProjectHash};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpBindTypeClient::from_env()?);
//! let controller = AddTypeController::new(
//!     ProjectHash::new("abc123"),
//!     "type Maybe a = Just a | Nothing",
//!     client,
//!     |project, hashes| println!("project {} gained {} bindings", project.hash, hashes.len()),
//! );
//!
//! controller.trigger().await;
//! println!("{:?}", controller.state().await);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod mocks;
pub mod reducer;
pub mod types;

pub use actions::AddTypeAction;
pub use client::HttpBindTypeClient;
pub use config::ClientConfig;
pub use controller::AddTypeController;
pub use environment::{AddTypeEnvironment, BindTypeClient, ProjectUpdater};
pub use error::{BindTypeError, ConfigError};
pub use reducer::AddTypeReducer;
pub use types::{
    AddType, AddTypeState, BindTypeRequest, BindTypeResponse, Codegen, ExprHash, ProjectData,
    ProjectHash, Typeclass, UserErrorResponse,
};
pub use typebind_core::RequestState;
