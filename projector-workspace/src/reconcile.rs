//! Workspace reconciler.
//!
//! Computes the description to write when switching to a project:
//!
//! 1. Base document: the current description, or [`WorkspaceDescription::with_sentinel`].
//! 2. Global settings: snapshot of the *first* description ever reconciled.
//! 3. Injected folders: the project's registry group, else the project's first folder.
//! 4. Folders: sentinel entries of the base, then injected folders deduplicated by `path`.
//! 5. Settings: one-level merge of the global snapshot with the group's overlay.
//! 6. Every other top-level key of the base passes through.

use projector_core::{registry, Folder, Project, Settings, WorkspaceDescription};

/// Owns the global settings snapshot across reconciliations.
///
/// The snapshot is taken on the first [`reconcile`](Reconciler::reconcile)
/// call and never refreshed, so user-authored global settings survive even
/// after an earlier run has already written a merged value to disk.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    global_settings: Option<Settings>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot, once taken.
    pub fn global_settings(&self) -> Option<&Settings> {
        self.global_settings.as_ref()
    }

    /// Forget the snapshot; the next reconciliation takes a fresh one.
    pub fn reset_global_settings(&mut self) {
        self.global_settings = None;
    }

    /// Build the description that activates `project`.
    ///
    /// `current` is the on-disk description, or `None` when it is missing or
    /// unreadable (see [`crate::file::or_default_policy`]).
    pub fn reconcile(
        &mut self,
        project: &Project,
        current: Option<&WorkspaceDescription>,
    ) -> WorkspaceDescription {
        let mut base = current
            .cloned()
            .unwrap_or_else(WorkspaceDescription::with_sentinel);

        let global = self
            .global_settings
            .get_or_insert_with(|| {
                let snapshot = current.map(|d| d.settings.clone()).unwrap_or_default();
                tracing::debug!(keys = snapshot.len(), "captured global settings snapshot");
                snapshot
            })
            .clone();

        let (injected, overlay) = resolve_project(project, current);

        base.folders.retain(Folder::is_sentinel);
        for folder in injected {
            if !base.folders.iter().any(|f| f.path == folder.path) {
                base.folders.push(folder);
            }
        }

        base.settings = merge_settings(global, overlay);

        tracing::debug!(
            project = %project.name,
            folders = base.folders.len(),
            settings = base.settings.len(),
            "reconciled workspace description",
        );
        base
    }
}

/// Folders to inject and the project-specific settings overlay.
fn resolve_project(
    project: &Project,
    current: Option<&WorkspaceDescription>,
) -> (Vec<Folder>, Option<Settings>) {
    if let Some(group) = current.and_then(|d| registry::find_group(d, &project.name)) {
        return (group.folders, group.settings);
    }

    let folders = project
        .first_folder()
        .map(|f| vec![Folder::new(f.name.clone(), f.path.clone())])
        .unwrap_or_default();
    (folders, None)
}

/// One-level merge: overlay keys replace global keys wholesale.
pub fn merge_settings(mut global: Settings, overlay: Option<Settings>) -> Settings {
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            global.insert(key, value);
        }
    }
    global
}
