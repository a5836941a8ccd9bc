//! `projector current`

use anyhow::Result;

use super::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let session = global.session()?;
    match session.service.current() {
        Some(project) if project.description.is_empty() => println!("{}", project.name),
        Some(project) => println!("{}: {}", project.name, project.description),
        None => println!("none"),
    }
    Ok(())
}
