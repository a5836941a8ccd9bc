//! `projector list [--json]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use projector_core::Project;

use super::GlobalArgs;

/// Arguments for `projector list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ProjectJson<'a> {
    #[serde(flatten)]
    project: &'a Project,
    current: bool,
}

#[derive(Tabled)]
struct ProjectTableRow {
    #[tabled(rename = "")]
    marker: String,
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "folders")]
    folders: String,
}

impl ListArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let session = global.session()?;
        let projects = session.service.list_projects();
        let current = session.service.current().map(|p| p.name.clone());
        let is_current = |p: &Project| current.as_ref() == Some(&p.name);

        if self.json {
            let payload: Vec<ProjectJson<'_>> = projects
                .iter()
                .map(|project| ProjectJson {
                    project,
                    current: is_current(project),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize project list")?
            );
            return Ok(());
        }

        println!(
            "Projector v{} | {} projects | {}",
            env!("CARGO_PKG_VERSION"),
            projects.len(),
            session.service.workspace_file().display(),
        );
        if projects.is_empty() {
            println!("No projects found.");
            println!(
                "Add a \"projectManager.projectList\" entry to the workspace file or ~/.projector/config.yaml."
            );
            return Ok(());
        }

        let rows: Vec<ProjectTableRow> = projects
            .iter()
            .map(|project| ProjectTableRow {
                marker: if is_current(project) {
                    "●".green().bold().to_string()
                } else {
                    String::new()
                },
                name: project.name.to_string(),
                description: project.description.clone(),
                folders: summarize_folders(project),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn summarize_folders(project: &Project) -> String {
    let folders = project.folders.as_deref().unwrap_or_default();
    let mut names: Vec<String> = folders
        .iter()
        .take(2)
        .map(|folder| folder.path.clone())
        .collect();
    if folders.len() > names.len() {
        names.push(format!("+{} more", folders.len() - names.len()));
    }
    names.join(", ")
}
