//! Workspace file I/O.
//!
//! ## Write protocol
//!
//! 1. Serialize the description as JSON with 4-space indentation.
//! 2. Ensure the parent directory exists.
//! 3. Write to `<path>.projector.tmp`.
//! 4. Rename to the final path (atomic on POSIX); on failure remove the `.tmp`.
//!
//! Reads return an explicit `Result`; the "missing or broken file means the
//! default document" rule lives in [`or_default_policy`] so callers apply it
//! visibly.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use projector_core::{paths, Config, WorkspaceDescription};

use crate::error::{io_err, WorkspaceError};

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Resolve the workspace description path.
///
/// Precedence: `explicit` (CLI flag) → `config.workspace_file` →
/// `<root>/work.code-workspace`. Relative paths resolve against `root`.
/// Returns [`WorkspaceError::ConfigurationMissing`] when no root is known.
pub fn resolve_workspace_file(
    explicit: Option<&Path>,
    config: &Config,
    root: Option<&Path>,
) -> Result<PathBuf, WorkspaceError> {
    let configured = explicit.or(config.workspace_file.as_deref());
    match (configured, root) {
        (Some(path), _) if path.is_absolute() => Ok(path.to_path_buf()),
        (Some(path), Some(root)) => Ok(root.join(path)),
        (None, Some(root)) => Ok(paths::default_workspace_file(root)),
        (_, None) => Err(WorkspaceError::ConfigurationMissing),
    }
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Read and parse the workspace description at `path`.
///
/// Returns `WorkspaceError::NotFound` if absent,
/// `WorkspaceError::Parse` (with path) if the content is not a JSON object.
/// Fields of an unexpected shape inside an object are read leniently, see
/// [`WorkspaceDescription`].
pub fn read_description_at(path: &Path) -> Result<WorkspaceDescription, WorkspaceError> {
    if !path.exists() {
        return Err(WorkspaceError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|source| WorkspaceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-side failure policy: any read error means "no document".
///
/// `NotFound` is expected on first use and logged at debug; parse and I/O
/// failures are logged as warnings.
pub fn or_default_policy(
    result: Result<WorkspaceDescription, WorkspaceError>,
) -> Option<WorkspaceDescription> {
    match result {
        Ok(description) => Some(description),
        Err(WorkspaceError::NotFound { path }) => {
            tracing::debug!(path = %path.display(), "workspace file absent, using defaults");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "unreadable workspace file, using defaults");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// Serialize `description` the way it is stored: 4-space indent, trailing newline.
pub fn to_workspace_json(description: &WorkspaceDescription) -> Result<String, WorkspaceError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    description.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Atomically write `description` to `path`.
pub fn write_description_at(
    path: &Path,
    description: &WorkspaceDescription,
) -> Result<(), WorkspaceError> {
    let tmp = PathBuf::from(format!("{}.projector.tmp", path.display()));
    write_description_with_tmp(path, description, &tmp)
}

fn write_description_with_tmp(
    path: &Path,
    description: &WorkspaceDescription,
    tmp: &Path,
) -> Result<(), WorkspaceError> {
    let content = to_workspace_json(description)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use projector_core::Folder;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = read_description_at(&tmp.path().join("work.code-workspace")).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }), "got: {err}");
        assert!(or_default_policy(Err(err)).is_none());
    }

    #[test]
    fn malformed_json_is_parse_error_and_policy_drops_it() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("work.code-workspace");
        fs::write(&path, "{ \"folders\": [ ").unwrap();
        let result = read_description_at(&path);
        assert!(matches!(result, Err(WorkspaceError::Parse { .. })));
        assert!(or_default_policy(result).is_none());
    }

    #[test]
    fn output_uses_four_space_indent() {
        let desc = WorkspaceDescription::with_sentinel();
        let json = to_workspace_json(&desc).unwrap();
        assert!(json.starts_with("{\n    \"folders\": [\n        {\n            \"name\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn write_then_read_preserves_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("work.code-workspace");
        let mut desc = WorkspaceDescription::with_sentinel();
        desc.folders.push(Folder::new("api", "/src/api"));
        desc.other.insert("extensions".into(), json!({"recommendations": []}));

        write_description_at(&path, &desc).unwrap();
        assert_eq!(read_description_at(&path).unwrap(), desc);
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("work.code-workspace");
        write_description_at(&path, &WorkspaceDescription::with_sentinel()).unwrap();
        let tmp_path = PathBuf::from(format!("{}.projector.tmp", path.display()));
        assert!(!tmp_path.exists(), ".projector.tmp must be cleaned up");
    }

    #[test]
    fn resolve_prefers_flag_then_config_then_root() {
        let root = Path::new("/ws");
        let mut config = Config::default();
        assert_eq!(
            resolve_workspace_file(None, &config, Some(root)).unwrap(),
            PathBuf::from("/ws/work.code-workspace")
        );

        config.workspace_file = Some(PathBuf::from("team.code-workspace"));
        assert_eq!(
            resolve_workspace_file(None, &config, Some(root)).unwrap(),
            PathBuf::from("/ws/team.code-workspace")
        );

        let flag = Path::new("/elsewhere/x.code-workspace");
        assert_eq!(
            resolve_workspace_file(Some(flag), &config, None).unwrap(),
            PathBuf::from("/elsewhere/x.code-workspace")
        );
    }

    #[test]
    fn resolve_without_root_is_configuration_missing() {
        let err = resolve_workspace_file(None, &Config::default(), None).unwrap_err();
        assert!(matches!(err, WorkspaceError::ConfigurationMissing));
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("work.code-workspace");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("work.code-workspace.projector.tmp");

        let result =
            write_description_with_tmp(&path, &WorkspaceDescription::with_sentinel(), &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename failed.
        if let Err(err) = result {
            assert!(matches!(err, WorkspaceError::Io { .. }), "got: {err}");
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), ".projector.tmp should be cleaned up");
        }
    }
}
