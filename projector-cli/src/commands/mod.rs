pub mod current;
pub mod list;
pub mod open;
pub mod refresh;
pub mod select;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use projector_core::{paths, Config, StateFile};
use projector_workspace::{resolve_workspace_file, ProjectService};

use crate::terminal::TerminalHost;

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Workspace root holding `work.code-workspace`. Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit workspace description file; overrides the config and `--root`.
    #[arg(long, global = true, value_name = "PATH")]
    pub workspace_file: Option<PathBuf>,
}

/// Everything one command invocation needs.
pub struct Session {
    pub home: PathBuf,
    pub config: Config,
    pub service: ProjectService<StateFile>,
}

impl Session {
    pub fn host(&self) -> TerminalHost {
        TerminalHost::new(self.config.editor_command.clone())
    }
}

impl GlobalArgs {
    pub fn session(&self) -> Result<Session> {
        let home = paths::home().context("could not determine home directory")?;
        let config = Config::load_at(&home).context("failed to load projector config")?;

        let root = match &self.root {
            Some(root) => Some(root.clone()),
            None => std::env::current_dir().ok(),
        };
        let workspace_file =
            resolve_workspace_file(self.workspace_file.as_deref(), &config, root.as_deref())
                .context("failed to resolve the workspace file")?;

        let store = StateFile::load_or_empty_at(&home);
        let mut service = ProjectService::from_config(workspace_file, &config, store);
        service.current_project_mut().subscribe(|project| {
            tracing::info!(project = %project.name, "current project changed");
        });
        Ok(Session {
            home,
            config,
            service,
        })
    }
}
