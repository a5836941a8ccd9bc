//! `projector refresh`: re-read the project list and print the status line.

use anyhow::Result;

use super::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let mut host = session.host();
    session.service.refresh(&mut host);
    Ok(())
}
