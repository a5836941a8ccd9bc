use std::path::{Path, PathBuf};

use crate::error::CoreError;

pub const PROJECTOR_DIR: &str = ".projector";
pub const CONFIG_FILE: &str = "config.yaml";
pub const STATE_FILE: &str = "state.json";

/// File name of the workspace description when none is configured.
pub const DEFAULT_WORKSPACE_FILE: &str = "work.code-workspace";

pub fn projector_root(home: &Path) -> PathBuf {
    home.join(PROJECTOR_DIR)
}

pub fn config_path(home: &Path) -> PathBuf {
    projector_root(home).join(CONFIG_FILE)
}

pub fn state_path(home: &Path) -> PathBuf {
    projector_root(home).join(STATE_FILE)
}

/// `<root>/work.code-workspace`: pure, no I/O.
pub fn default_workspace_file(root: &Path) -> PathBuf {
    root.join(DEFAULT_WORKSPACE_FILE)
}

pub fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}
