//! `projector select`: interactive picker.

use anyhow::{Context, Result};

use projector_workspace::select_project;

use super::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let mut session = global.session()?;
    let mut host = session.host();

    let opened = select_project(&mut session.service, &mut host).context("project switch failed")?;
    if let Some(project) = opened {
        println!("✓ Opened '{}'", project.name);
    }
    Ok(())
}
