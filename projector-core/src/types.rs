//! Domain types for projects and the on-disk workspace description.
//!
//! The workspace description is the editor's multi-root JSON document. Only
//! `folders`, `settings` and the legacy project registry key are modelled;
//! every other top-level key rides along in [`WorkspaceDescription::other`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level key of the grouped-folder project registry inside a workspace file.
pub const PROJECT_LIST_KEY: &str = "projectManager.projectList";

/// Name of the root folder entry that survives every reconciliation.
pub const SENTINEL_NAME: &str = "workspace";

/// Path of the root folder entry that survives every reconciliation.
pub const SENTINEL_PATH: &str = "./";

/// Editor settings object. Key order follows the source document.
pub type Settings = Map<String, Value>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a project. Unique within one listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One entry of a workspace `folders` array.
///
/// Keys other than `name` and `path` (the editor also accepts `uri`) are kept
/// in `extra` so that foreign entries are written back untouched. A `name` or
/// `path` that is not a string stays in `extra` as written.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Folder {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Folder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Folder::from_entry)
    }
}

impl Folder {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            extra: Map::new(),
        }
    }

    /// Build a folder from a raw `folders` entry, keeping every foreign key.
    pub fn from_entry(entry: Map<String, Value>) -> Self {
        let mut folder = Self::default();
        for (key, value) in entry {
            let slot = match key.as_str() {
                "name" => Some(&mut folder.name),
                "path" => Some(&mut folder.path),
                _ => None,
            };
            match (slot, value) {
                (Some(slot), Value::String(text)) => *slot = text,
                (_, value) => {
                    folder.extra.insert(key, value);
                }
            }
        }
        folder
    }

    /// The workspace's own root entry: `{name: "workspace"}` or `{path: "./"}`.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_NAME, SENTINEL_PATH)
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_NAME || self.path == SENTINEL_PATH
    }
}

/// A named bundle of folders and settings the user can switch to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: ProjectName,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<Folder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl Project {
    pub fn new(name: impl Into<ProjectName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            folders: None,
            settings: None,
        }
    }

    pub fn with_folders(mut self, folders: Vec<Folder>) -> Self {
        self.folders = Some(folders);
        self
    }

    /// First declared folder, if the project carries any.
    pub fn first_folder(&self) -> Option<&Folder> {
        self.folders.as_deref().and_then(<[Folder]>::first)
    }
}

/// The on-disk workspace description (`*.code-workspace`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkspaceDescription {
    /// A non-array `folders` reads as empty; non-object entries are dropped.
    #[serde(default, deserialize_with = "lenient_folders")]
    pub folders: Vec<Folder>,
    /// A non-object `settings` (including `null`) reads as empty.
    #[serde(default, deserialize_with = "lenient_settings")]
    pub settings: Settings,
    /// Legacy grouped-folder registry. Kept verbatim whatever its shape,
    /// `null` included; only an object is interpreted as a registry.
    #[serde(
        rename = "projectManager.projectList",
        default,
        deserialize_with = "verbatim",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_list: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl WorkspaceDescription {
    /// Document used when no workspace file can be read: the sentinel folder
    /// and no settings.
    pub fn with_sentinel() -> Self {
        Self {
            folders: vec![Folder::sentinel()],
            ..Self::default()
        }
    }

    /// The registry object, when present and object-shaped.
    pub fn registry(&self) -> Option<&Map<String, Value>> {
        self.project_list.as_ref().and_then(Value::as_object)
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

fn lenient_folders<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Folder>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        _ => return Ok(vec![]),
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(entry) => Some(Folder::from_entry(entry)),
            _ => None,
        })
        .collect())
}

fn lenient_settings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Settings, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(settings) => Ok(settings),
        _ => Ok(Settings::new()),
    }
}

fn verbatim<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
