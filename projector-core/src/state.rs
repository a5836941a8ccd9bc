//! Durable key-value state and the current-project holder.
//!
//! Persists a [`StateDocument`] JSON file at `<home>/.projector/state.json`.
//! Writes use the same atomic `.tmp` + rename pattern as the workspace writer.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{io_err, CoreError};
use crate::paths::state_path;
use crate::types::{Project, ProjectName};

/// Durable-state key holding the last opened project.
pub const CURRENT_PROJECT_KEY: &str = "currentProject";

/// Host-side durable key-value store that outlives the process.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&mut self, key: &str, value: Value) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// StateFile
// ---------------------------------------------------------------------------

/// On-disk state payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateDocument {
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub values: Map<String, Value>,
}

/// [`StateStore`] backed by `<home>/.projector/state.json`.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    document: StateDocument,
}

impl StateFile {
    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            document: StateDocument {
                updated_at: Utc::now(),
                values: Map::new(),
            },
        }
    }

    /// Load the state file under `home`. Returns an empty store if absent.
    pub fn load_at(home: &Path) -> Result<Self, CoreError> {
        let path = state_path(home);
        if !path.exists() {
            return Ok(Self::empty(path));
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let document = serde_json::from_str(&contents)
            .map_err(|source| CoreError::StateParse { path: path.clone(), source })?;
        Ok(Self { path, document })
    }

    /// [`load_at`](Self::load_at), starting from an empty store when the file
    /// cannot be read or parsed. The next write replaces the broken file.
    pub fn load_or_empty_at(home: &Path) -> Self {
        match Self::load_at(home) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable state file, starting empty");
                Self::empty(state_path(home))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.document.updated_at
    }

    /// Write `<path>.tmp` then rename to `<path>`.
    fn save(&self) -> Result<(), CoreError> {
        let Some(dir) = self.path.parent() else {
            return Err(io_err(
                &self.path,
                std::io::Error::other("invalid state file path"),
            ));
        };
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

        let json = serde_json::to_string_pretty(&self.document)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }
}

impl StateStore for StateFile {
    fn get(&self, key: &str) -> Option<Value> {
        self.document.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), CoreError> {
        self.document.values.insert(key.to_owned(), value);
        self.document.updated_at = Utc::now();
        self.save()
    }
}

// ---------------------------------------------------------------------------
// CurrentProject
// ---------------------------------------------------------------------------

type Observer = Box<dyn FnMut(&Project)>;

/// Holds the project the user last opened.
///
/// Observers registered with [`CurrentProject::subscribe`] run synchronously
/// on every [`CurrentProject::set`]; nothing is queued or retried.
#[derive(Default)]
pub struct CurrentProject {
    current: Option<Project>,
    observers: Vec<Observer>,
}

impl CurrentProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn is_current(&self, name: &ProjectName) -> bool {
        self.current.as_ref().is_some_and(|p| &p.name == name)
    }

    /// Replace the current project, persist it under [`CURRENT_PROJECT_KEY`]
    /// and notify observers. A persistence failure is logged, not returned.
    pub fn set(&mut self, project: Project, store: &mut dyn StateStore) {
        let project = &*self.current.insert(project);
        match serde_json::to_value(project) {
            Ok(value) => {
                if let Err(err) = store.put(CURRENT_PROJECT_KEY, value) {
                    tracing::warn!(error = %err, project = %project.name, "failed to persist current project");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, project = %project.name, "failed to encode current project");
            }
        }

        for observer in &mut self.observers {
            observer(project);
        }
    }

    /// Restore a previously persisted value. `None` leaves the slot untouched.
    pub fn restore(&mut self, persisted: Option<Project>) {
        if let Some(project) = persisted {
            tracing::debug!(project = %project.name, "restored current project");
            self.current = Some(project);
        }
    }

    /// Read [`CURRENT_PROJECT_KEY`] from `store` and [`restore`](Self::restore) it.
    /// An undecodable value is logged and ignored.
    pub fn restore_from(&mut self, store: &dyn StateStore) {
        let persisted = store
            .get(CURRENT_PROJECT_KEY)
            .filter(|value| !value.is_null())
            .and_then(|value| match serde_json::from_value::<Project>(value) {
                Ok(project) => Some(project),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring undecodable persisted project");
                    None
                }
            });
        self.restore(persisted);
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Project) + 'static) {
        self.observers.push(Box::new(observer));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
