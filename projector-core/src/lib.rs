//! Projector core library: domain types, project registry, config, durable state.
//!
//! - [`types`]: projects, folders and the workspace description document
//! - [`registry`]: project listing and registry group resolution
//! - [`config`]: `~/.projector/config.yaml`
//! - [`state`]: durable key-value state and the current-project holder
//! - [`error`]: [`CoreError`]

pub mod config;
pub mod error;
pub mod paths;
pub mod registry;
pub mod state;
pub mod types;

pub use config::Config;
pub use error::CoreError;
pub use state::{CurrentProject, StateFile, StateStore, CURRENT_PROJECT_KEY};
pub use types::{
    Folder, Project, ProjectName, Settings, WorkspaceDescription, PROJECT_LIST_KEY,
    SENTINEL_NAME, SENTINEL_PATH,
};
