//! User configuration at `~/.projector/config.yaml`.
//!
//! ```yaml
//! workspace_file: /home/me/src/work.code-workspace
//! settle_delay_ms: 1000
//! editor_command: ["code", "--reuse-window"]
//! projectManager.projectList:
//!   - name: Alpha
//!     description: demo
//!     folders:
//!       - { name: alpha, path: /home/me/src/alpha }
//! ```
//!
//! Every key is optional. A missing file yields [`Config::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::paths::config_path;
use crate::types::Project;

/// Delay between asking the editor to load a workspace and refreshing the
/// project display.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit workspace description path; overrides `<root>/work.code-workspace`.
    pub workspace_file: Option<PathBuf>,
    pub settle_delay_ms: u64,
    /// Command used to load a workspace in the editor. The workspace path is
    /// appended as the last argument.
    pub editor_command: Option<Vec<String>>,
    /// Legacy flat project list, used when the workspace registry is empty.
    #[serde(rename = "projectManager.projectList", alias = "project_list")]
    pub project_list: Vec<Project>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_file: None,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            editor_command: None,
            project_list: vec![],
        }
    }
}

impl Config {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Load `<home>/.projector/config.yaml`.
    ///
    /// Returns the defaults if the file is absent,
    /// `CoreError::ConfigParse` (with path + line context) if malformed YAML.
    pub fn load_at(home: &Path) -> Result<Self, CoreError> {
        let path = config_path(home);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| CoreError::ConfigParse { path, source })
    }
}
