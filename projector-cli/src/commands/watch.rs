//! `projector watch`: refresh the status line whenever the workspace file or
//! the config file changes.

use anyhow::{Context, Result};

use projector_core::paths::config_path;
use projector_watch::{start_blocking, ChangeKind, WatchTargets};

use super::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let targets = WatchTargets::new(
        session.service.workspace_file().to_path_buf(),
        Some(config_path(&session.home)),
    );
    session.service.refresh(&mut session.host());

    start_blocking(targets, |kind, path| {
        tracing::info!(?kind, path = %path.display(), "project list updated");
        // A config edit may move the workspace file or change the legacy list.
        match global.session() {
            Ok(session) => session.service.refresh(&mut session.host()),
            Err(err) if kind == ChangeKind::Config => {
                tracing::warn!(error = %format!("{err:#}"), "config reload failed")
            }
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "refresh failed"),
        }
    })
    .context("watcher exited with error")
}
