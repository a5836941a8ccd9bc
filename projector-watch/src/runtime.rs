use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::{io_err, WatchError};

pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Which watched file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The workspace description (registry or folders may have moved).
    Workspace,
    /// The projector config file (legacy list, workspace path).
    Config,
}

/// Files whose edits affect the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTargets {
    pub workspace_file: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl WatchTargets {
    pub fn new(workspace_file: PathBuf, config_file: Option<PathBuf>) -> Self {
        Self {
            workspace_file,
            config_file,
        }
    }

    // Canonicalize so that FSEvents paths (which arrive as real paths, e.g.
    // /private/var/... on macOS) compare equal to the targets.
    fn canonicalized(&self) -> Self {
        Self {
            workspace_file: canonical_file_path(&self.workspace_file),
            config_file: self.config_file.as_deref().map(canonical_file_path),
        }
    }

    /// Existing parent directories to register with the watcher, deduplicated.
    fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = std::iter::once(self.workspace_file.as_path())
            .chain(self.config_file.as_deref())
            .filter_map(Path::parent)
            .filter(|dir| dir.is_dir())
            .map(Path::to_path_buf)
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    fn classify(&self, path: &Path) -> Option<ChangeKind> {
        let path = canonical_file_path(path);
        if path == self.workspace_file {
            Some(ChangeKind::Workspace)
        } else if self.config_file.as_deref() == Some(path.as_path()) {
            Some(ChangeKind::Config)
        } else {
            None
        }
    }
}

/// Start a current-thread runtime and block until ctrl-c.
pub fn start_blocking<F>(targets: WatchTargets, on_change: F) -> Result<(), WatchError>
where
    F: FnMut(ChangeKind, &Path),
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(targets, on_change))
}

/// Watch `targets` and call `on_change` once per debounced change until ctrl-c.
pub async fn run<F>(targets: WatchTargets, mut on_change: F) -> Result<(), WatchError>
where
    F: FnMut(ChangeKind, &Path),
{
    let targets = targets.canonicalized();
    let dirs = targets.directories();
    if dirs.is_empty() {
        return Err(WatchError::NothingToWatch(targets.workspace_file));
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher: RecommendedWatcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;
    for dir in &dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), "watching");
    }

    let mut debounce = HashMap::<PathBuf, Instant>::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                match signal {
                    Ok(()) => {
                        tracing::info!("received ctrl-c, stopping watcher");
                        break;
                    }
                    Err(err) => return Err(WatchError::Signal(err.to_string())),
                }
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };
                if !is_relevant_event_kind(&event.kind) {
                    continue;
                }

                for path in event.paths {
                    let Some(kind) = targets.classify(&path) else {
                        continue;
                    };
                    if !should_process_event(&mut debounce, &path, Instant::now()) {
                        continue;
                    }
                    tracing::debug!(?kind, path = %path.display(), "change detected");
                    on_change(kind, &path);
                }
            }
        }
    }

    Ok(())
}

fn is_relevant_event_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Canonical parent joined with the file name; the file itself may not exist.
fn canonical_file_path(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => fs::canonicalize(parent)
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn should_process_event(
    debounce: &mut HashMap<PathBuf, Instant>,
    path: &Path,
    now: Instant,
) -> bool {
    should_process_event_with_threshold(debounce, path, now, DEBOUNCE_WINDOW)
}

fn should_process_event_with_threshold(
    debounce: &mut HashMap<PathBuf, Instant>,
    path: &Path,
    now: Instant,
    threshold: Duration,
) -> bool {
    debounce.retain(|_, seen_at| now.duration_since(*seen_at) <= Duration::from_secs(30));
    match debounce.get(path) {
        Some(last_seen) if now.duration_since(*last_seen) < threshold => false,
        _ => {
            debounce.insert(path.to_path_buf(), now);
            true
        }
    }
}
