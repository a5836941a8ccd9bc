//! Project service: the orchestrator behind "select project" and
//! "refresh project list".
//!
//! Owns the reconciler snapshot, the current-project slot and the durable
//! store for one session. Nothing here is process-global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use projector_core::{
    config::DEFAULT_SETTLE_DELAY_MS, registry, Config, CurrentProject, Project, StateStore,
    WorkspaceDescription,
};

use crate::error::WorkspaceError;
use crate::file::{or_default_policy, read_description_at, write_description_at};
use crate::host::{ChoiceItem, Host, ProjectStatus};
use crate::reconcile::Reconciler;

pub struct ProjectService<S> {
    workspace_file: PathBuf,
    legacy: Vec<Project>,
    settle_delay: Duration,
    reconciler: Reconciler,
    current: CurrentProject,
    store: S,
}

impl<S: StateStore> ProjectService<S> {
    /// Create a service for `workspace_file`, restoring the current project
    /// from `store`.
    pub fn new(workspace_file: PathBuf, legacy: Vec<Project>, store: S) -> Self {
        let mut current = CurrentProject::new();
        current.restore_from(&store);
        Self {
            workspace_file,
            legacy,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            reconciler: Reconciler::new(),
            current,
            store,
        }
    }

    /// Service configured from `config`: legacy list and settle delay.
    pub fn from_config(workspace_file: PathBuf, config: &Config, store: S) -> Self {
        Self::new(workspace_file, config.project_list.clone(), store)
            .with_settle_delay(config.settle_delay())
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn workspace_file(&self) -> &Path {
        &self.workspace_file
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.get()
    }

    /// Access to the current-project slot, e.g. to subscribe observers.
    pub fn current_project_mut(&mut self) -> &mut CurrentProject {
        &mut self.current
    }

    fn read_current(&self) -> Option<WorkspaceDescription> {
        or_default_policy(read_description_at(&self.workspace_file))
    }

    /// Projects from the workspace registry, else the legacy config list.
    pub fn list_projects(&self) -> Vec<Project> {
        registry::list_projects(self.read_current().as_ref(), &self.legacy)
    }

    pub fn find_project(&self, name: &str) -> Option<Project> {
        registry::find_project(&self.list_projects(), name).cloned()
    }

    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::new(self.current.get(), self.list_projects().len())
    }

    /// Reconcile the workspace file for `project` and write it back.
    ///
    /// Read failures fall back to the default document; write failures
    /// propagate as [`WorkspaceError::Io`].
    pub fn update_workspace_file(
        &mut self,
        project: &Project,
    ) -> Result<WorkspaceDescription, WorkspaceError> {
        let current = self.read_current();
        let updated = self.reconciler.reconcile(project, current.as_ref());
        write_description_at(&self.workspace_file, &updated)?;
        Ok(updated)
    }

    /// Switch to `project`.
    ///
    /// The current project is updated before the write is attempted and is
    /// not rolled back if the write fails.
    pub fn open_project(&mut self, project: Project, host: &mut dyn Host) -> Result<(), WorkspaceError> {
        tracing::info!(project = %project.name, "opening project");
        self.current.set(project.clone(), &mut self.store);

        self.update_workspace_file(&project)?;
        host.request_workspace_load(&self.workspace_file)?;

        if !self.settle_delay.is_zero() {
            std::thread::sleep(self.settle_delay);
        }
        self.refresh(host);
        Ok(())
    }

    /// Fire "project list updated" with a freshly computed status.
    pub fn refresh(&self, host: &mut dyn Host) {
        host.project_list_updated(&self.status());
    }
}

/// The "select project" action: pick from the list, refresh, or open.
///
/// Returns the opened project, if any.
pub fn select_project<S: StateStore>(
    service: &mut ProjectService<S>,
    host: &mut dyn Host,
) -> Result<Option<Project>, WorkspaceError> {
    let projects = service.list_projects();
    if projects.is_empty() {
        host.notify(&format!(
            "No projects found. Add a \"projectManager.projectList\" entry to {}.",
            service.workspace_file().display()
        ));
        return Ok(None);
    }

    let mut items: Vec<ChoiceItem> = projects
        .into_iter()
        .map(|project| {
            let is_current = service.current.is_current(&project.name);
            ChoiceItem::Project { project, is_current }
        })
        .collect();
    items.push(ChoiceItem::Refresh);

    let Some(index) = host.present_choice(&items) else {
        return Ok(None);
    };

    match items.into_iter().nth(index) {
        Some(ChoiceItem::Refresh) => {
            service.refresh(host);
            host.notify("Project list refreshed");
            Ok(None)
        }
        Some(ChoiceItem::Project { project, .. }) => {
            service.open_project(project.clone(), host)?;
            Ok(Some(project))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projector_core::{Folder, ProjectName, StateFile};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingHost {
        pick: Option<usize>,
        offered: Vec<ChoiceItem>,
        messages: Vec<String>,
        loads: Vec<PathBuf>,
        refreshes: Vec<ProjectStatus>,
    }

    impl Host for RecordingHost {
        fn present_choice(&mut self, items: &[ChoiceItem]) -> Option<usize> {
            self.offered = items.to_vec();
            self.pick
        }
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
        fn request_workspace_load(&mut self, path: &Path) -> Result<(), WorkspaceError> {
            self.loads.push(path.to_path_buf());
            Ok(())
        }
        fn project_list_updated(&mut self, status: &ProjectStatus) {
            self.refreshes.push(status.clone());
        }
    }

    fn service(home: &TempDir, root: &TempDir) -> ProjectService<StateFile> {
        let store = StateFile::load_at(home.path()).unwrap();
        ProjectService::new(root.path().join("work.code-workspace"), vec![], store)
            .with_settle_delay(Duration::ZERO)
    }

    fn write_workspace(root: &TempDir, value: serde_json::Value) {
        fs::write(
            root.path().join("work.code-workspace"),
            serde_json::to_string(&value).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn open_project_writes_loads_and_refreshes() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        write_workspace(
            &root,
            json!({
                "folders": [{"name": "workspace", "path": "./"}],
                "projectManager.projectList": {"Foo": {"folders": [{"name": "x", "path": "/a"}]}}
            }),
        );
        let mut svc = service(&home, &root);
        let mut host = RecordingHost::default();

        let project = svc.find_project("Foo").expect("listed");
        svc.open_project(project, &mut host).unwrap();

        let written = read_description_at(svc.workspace_file()).unwrap();
        assert_eq!(written.folders, vec![Folder::sentinel(), Folder::new("x", "/a")]);
        assert_eq!(host.loads, vec![svc.workspace_file().to_path_buf()]);
        assert_eq!(host.refreshes.len(), 1);
        assert_eq!(host.refreshes[0].current, Some(ProjectName::from("Foo")));
    }

    #[test]
    fn subscribers_see_opened_project() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::<String>::new()));
        let mut svc = service(&home, &root);
        let sink = std::rc::Rc::clone(&seen);
        svc.current_project_mut()
            .subscribe(move |project| sink.borrow_mut().push(project.name.0.clone()));

        svc.open_project(Project::new("Alpha", ""), &mut RecordingHost::default())
            .unwrap();
        assert_eq!(*seen.borrow(), ["Alpha"]);
    }

    #[test]
    fn current_project_survives_a_new_session() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        let mut host = RecordingHost::default();
        service(&home, &root)
            .open_project(Project::new("Alpha", "demo"), &mut host)
            .unwrap();

        let reopened = service(&home, &root);
        assert_eq!(reopened.current(), Some(&Project::new("Alpha", "demo")));
    }

    #[test]
    #[cfg(unix)]
    fn write_failure_keeps_optimistic_current_project() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        // A directory where the workspace file should be makes the rename fail.
        fs::create_dir_all(root.path().join("work.code-workspace").join("child")).unwrap();
        let mut svc = service(&home, &root);
        let mut host = RecordingHost::default();

        let err = svc
            .open_project(Project::new("Alpha", ""), &mut host)
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Io { .. }), "got: {err}");
        assert_eq!(svc.current().map(|p| p.name.0.as_str()), Some("Alpha"));
        assert!(host.loads.is_empty(), "no load after a failed write");
    }

    #[test]
    fn select_with_no_projects_notifies() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        let mut svc = service(&home, &root);
        let mut host = RecordingHost::default();

        assert_eq!(select_project(&mut svc, &mut host).unwrap(), None);
        assert!(host.messages[0].starts_with("No projects found"));
        assert!(host.offered.is_empty());
    }

    #[test]
    fn select_marks_current_and_offers_refresh() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        write_workspace(
            &root,
            json!({"projectManager.projectList": {
                "Foo": {"folders": []},
                "Bar": {"folders": []}
            }}),
        );
        let mut svc = service(&home, &root);
        let mut host = RecordingHost::default();
        svc.open_project(Project::new("Bar", ""), &mut host).unwrap();

        host.pick = Some(2);
        assert_eq!(select_project(&mut svc, &mut host).unwrap(), None);
        assert_eq!(host.offered.len(), 3);
        assert!(matches!(&host.offered[0], ChoiceItem::Project { is_current: false, .. }));
        assert!(matches!(&host.offered[1], ChoiceItem::Project { is_current: true, .. }));
        assert_eq!(host.offered[2], ChoiceItem::Refresh);
        assert_eq!(host.messages.last().map(String::as_str), Some("Project list refreshed"));
    }

    #[test]
    fn select_opens_picked_project() {
        let (home, root) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        write_workspace(
            &root,
            json!({"projectManager.projectList": {"Foo": {"folders": [{"name": "x", "path": "/a"}]}}}),
        );
        let mut svc = service(&home, &root);
        let mut host = RecordingHost { pick: Some(0), ..Default::default() };

        let opened = select_project(&mut svc, &mut host).unwrap().expect("opened");
        assert_eq!(opened.name, ProjectName::from("Foo"));
        assert_eq!(host.loads.len(), 1);
    }
}
