//! # projector-workspace
//!
//! Workspace description reconciliation and atomic persistence.
//!
//! [`ProjectService::open_project`] is the canonical switch entrypoint: it
//! records the current project, reconciles and writes the workspace file, and
//! asks the [`Host`] to load it. [`Reconciler`] holds the pure merge logic.

pub mod error;
pub mod file;
pub mod host;
pub mod reconcile;
pub mod service;

pub use error::WorkspaceError;
pub use file::{
    or_default_policy, read_description_at, resolve_workspace_file, to_workspace_json,
    write_description_at,
};
pub use host::{ChoiceItem, Host, ProjectStatus};
pub use reconcile::{merge_settings, Reconciler};
pub use service::{select_project, ProjectService};
