//! `projector open <name>`

use anyhow::{bail, Context, Result};
use clap::Args;

use super::GlobalArgs;

/// Arguments for `projector open`.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Project name as shown by `projector list`.
    pub name: String,
}

impl OpenArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let mut session = global.session()?;
        let mut host = session.host();

        let Some(project) = session.service.find_project(&self.name) else {
            let names: Vec<String> = session
                .service
                .list_projects()
                .into_iter()
                .map(|p| p.name.0)
                .collect();
            if names.is_empty() {
                bail!("unknown project '{}'; no projects are configured", self.name);
            }
            bail!(
                "unknown project '{}'; available: {}",
                self.name,
                names.join(", ")
            );
        };

        session
            .service
            .open_project(project, &mut host)
            .with_context(|| format!("failed to open project '{}'", self.name))?;

        println!(
            "✓ Opened '{}' in {}",
            self.name,
            session.service.workspace_file().display()
        );
        Ok(())
    }
}
