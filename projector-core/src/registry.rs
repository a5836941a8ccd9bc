//! Project registry reader.
//!
//! # Sources
//!
//! ```text
//! work.code-workspace
//!   "projectManager.projectList": {
//!     "<group>": { "description"?, "folders": [...], "settings"? }
//!   }
//! ~/.projector/config.yaml
//!   projectManager.projectList: [ <Project>, ... ]     (legacy flat list)
//! ```
//!
//! The workspace registry wins whenever it yields at least one project; the
//! legacy list is only consulted when it yields none.

use serde_json::{Map, Value};

use crate::types::{Folder, Project, ProjectName, Settings, WorkspaceDescription};

/// Folders and settings overlay resolved for one registry group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectGroup {
    pub folders: Vec<Folder>,
    pub settings: Option<Settings>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// List selectable projects.
///
/// `description` is the current workspace document, or `None` when it could
/// not be read. Read failures never surface here; they only mean "no registry".
pub fn list_projects(description: Option<&WorkspaceDescription>, legacy: &[Project]) -> Vec<Project> {
    let projects = description.map(projects_from_registry).unwrap_or_default();
    if !projects.is_empty() {
        return projects;
    }
    tracing::debug!(count = legacy.len(), "falling back to legacy project list");
    legacy.to_vec()
}

/// One [`Project`] per registry group with an array-valued `folders` field,
/// in document key order.
pub fn projects_from_registry(description: &WorkspaceDescription) -> Vec<Project> {
    let Some(registry) = description.registry() else {
        return vec![];
    };

    registry
        .iter()
        .filter_map(|(group_name, group)| {
            let group = group.as_object()?;
            let folders = group.get("folders")?.as_array()?;
            let folders: Vec<Folder> = folders.iter().filter_map(listed_folder).collect();
            let description = group
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();

            let mut project = Project::new(group_name.as_str(), description);
            if !folders.is_empty() {
                project.folders = Some(folders);
            }
            Some(project)
        })
        .collect()
}

/// Look up a project by name in an already-resolved listing.
pub fn find_project<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.name.0 == name)
}

// ---------------------------------------------------------------------------
// Group resolution (used by the reconciler)
// ---------------------------------------------------------------------------

/// Resolve the registry group named `name`.
///
/// Only the first group whose key matches and whose `folders` is an array
/// counts. Injected folders carry `name` and `path` only; a `settings` object
/// on the group becomes the project-specific overlay.
pub fn find_group(description: &WorkspaceDescription, name: &ProjectName) -> Option<ProjectGroup> {
    let registry = description.registry()?;
    let group = registry.get(&name.0)?.as_object()?;
    let folders = group.get("folders")?.as_array()?;

    Some(ProjectGroup {
        folders: folders.iter().filter_map(injected_folder).collect(),
        settings: group.get("settings").and_then(Value::as_object).cloned(),
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Registry folder as shown in a listing: the entry itself, foreign keys included.
fn listed_folder(value: &Value) -> Option<Folder> {
    value.as_object().cloned().map(Folder::from_entry)
}

/// Registry folder as written into the workspace: `{name, path}` only.
fn injected_folder(value: &Value) -> Option<Folder> {
    let object = value.as_object()?;
    Some(Folder::new(string_field(object, "name"), string_field(object, "path")))
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
