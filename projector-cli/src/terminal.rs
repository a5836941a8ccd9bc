//! Terminal implementation of the host capabilities.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use colored::Colorize;

use projector_workspace::{ChoiceItem, Host, ProjectStatus, WorkspaceError};

pub struct TerminalHost {
    editor_command: Option<Vec<String>>,
}

impl TerminalHost {
    pub fn new(editor_command: Option<Vec<String>>) -> Self {
        Self { editor_command }
    }
}

impl Host for TerminalHost {
    fn present_choice(&mut self, items: &[ChoiceItem]) -> Option<usize> {
        for (i, item) in items.iter().enumerate() {
            let marker = match item {
                ChoiceItem::Project { is_current: true, .. } => "●".green().bold().to_string(),
                ChoiceItem::Project { .. } => "○".normal().to_string(),
                ChoiceItem::Refresh => "↻".cyan().to_string(),
            };
            let description = match item {
                ChoiceItem::Project { project, .. } => project.description.as_str(),
                ChoiceItem::Refresh => "",
            };
            println!(
                "{:>3}. {marker} {:<24} {} {}",
                i + 1,
                item.label(),
                description,
                format!("({})", item.detail()).bright_black(),
            );
        }
        print!("Select [1-{}], empty to cancel: ", items.len());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => parse_choice(&line, items.len()),
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn request_workspace_load(&mut self, path: &Path) -> Result<(), WorkspaceError> {
        let Some((program, args)) = self
            .editor_command
            .as_deref()
            .and_then(<[String]>::split_first)
        else {
            println!("Workspace ready: {}", path.display());
            return Ok(());
        };

        let child = Command::new(program)
            .args(args)
            .arg(path)
            .spawn()
            .map_err(|source| WorkspaceError::Io {
                path: program.into(),
                source,
            })?;
        tracing::info!(pid = child.id(), program = %program, "requested workspace load");
        Ok(())
    }

    fn project_list_updated(&mut self, status: &ProjectStatus) {
        let marker = if status.current.is_some() {
            "■".green().bold()
        } else {
            "■".bright_black().bold()
        };
        println!("{marker} {}", status.text);
    }
}

/// 1-based menu input to a 0-based index.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_accepts_in_range_numbers() {
        assert_eq!(parse_choice("1\n", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
    }

    #[test]
    fn parse_choice_rejects_everything_else() {
        assert_eq!(parse_choice("\n", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }

    #[test]
    fn load_without_editor_command_is_a_no_op() {
        let mut host = TerminalHost::new(None);
        host.request_workspace_load(Path::new("/tmp/work.code-workspace"))
            .unwrap();
    }

    #[test]
    fn missing_editor_binary_is_an_io_error() {
        let mut host = TerminalHost::new(Some(vec!["projector-no-such-editor".to_string()]));
        let err = host
            .request_workspace_load(Path::new("/tmp/work.code-workspace"))
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Io { .. }), "got: {err}");
    }
}
