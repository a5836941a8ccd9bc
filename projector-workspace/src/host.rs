//! Capabilities the surrounding editor (or terminal) provides to the service.

use std::path::Path;

use projector_core::{Project, ProjectName};

use crate::error::WorkspaceError;

/// One row of the project picker.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceItem {
    Project { project: Project, is_current: bool },
    /// Re-read the project list without opening anything.
    Refresh,
}

impl ChoiceItem {
    pub fn label(&self) -> String {
        match self {
            ChoiceItem::Project { project, .. } => project.name.to_string(),
            ChoiceItem::Refresh => "Refresh project list".to_string(),
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            ChoiceItem::Project { is_current: true, .. } => "current project",
            ChoiceItem::Project { .. } => "open project",
            ChoiceItem::Refresh => "reload the project list",
        }
    }
}

/// Status-line summary of the project state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatus {
    pub text: String,
    pub tooltip: String,
    pub project_count: usize,
    pub current: Option<ProjectName>,
}

impl ProjectStatus {
    pub fn new(current: Option<&Project>, project_count: usize) -> Self {
        let (text, tooltip) = match current {
            Some(project) => (
                project.name.to_string(),
                format!(
                    "Projector\nCurrent project: {}\nDescription: {}",
                    project.name, project.description
                ),
            ),
            None if project_count > 0 => (
                format!("{project_count} projects"),
                format!("Projector\n{project_count} projects available"),
            ),
            None => (
                "Select project".to_string(),
                "Projector\nNo projects".to_string(),
            ),
        };
        Self {
            text,
            tooltip,
            project_count,
            current: current.map(|p| p.name.clone()),
        }
    }
}

/// Host environment seam.
pub trait Host {
    /// Show `items` and return the index the user picked, or `None` when dismissed.
    fn present_choice(&mut self, items: &[ChoiceItem]) -> Option<usize>;

    /// User-visible informational message.
    fn notify(&mut self, message: &str);

    /// Make the workspace at `path` the active one.
    fn request_workspace_load(&mut self, path: &Path) -> Result<(), WorkspaceError>;

    /// The "project list updated" notification; re-render any project display.
    fn project_list_updated(&mut self, status: &ProjectStatus);
}
