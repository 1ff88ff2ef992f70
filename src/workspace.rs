//! Workspace path guard.
//!
//! Every file a tool reads or writes must live under the single configured
//! workspace directory. Callers supply filenames or relative paths only;
//! absolute paths, `..` traversal, and symlinks escaping the workspace are
//! all refused. The configured directory is re-resolved on every call, so a
//! swapped configuration or a directory appearing on disk takes effect
//! immediately.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable honored by [`Workspace::from_env`].
pub const WORKSPACE_ENV: &str = "CORRAL_WORKSPACE";

const MAX_SYMLINK_HOPS: u32 = 32;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    dir: Option<PathBuf>,
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    /// A workspace with no directory set; every file operation fails closed.
    pub fn unconfigured() -> Self {
        Self { dir: None }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self { dir: cfg.workspace.dir.clone() }
    }

    /// Read the directory from `CORRAL_WORKSPACE` at construction time.
    pub fn from_env() -> Self {
        Self { dir: std::env::var_os(WORKSPACE_ENV).map(PathBuf::from) }
    }

    /// Resolve the configured directory to its canonical absolute form.
    ///
    /// Fails with [`AppError::NotConfigured`] when the directory is unset,
    /// empty, missing, or not a directory. The error message may echo the
    /// raw configured string but never the canonical resolved path.
    pub fn root(&self) -> AppResult<PathBuf> {
        let dir = match &self.dir {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => {
                return Err(AppError::NotConfigured(
                    "workspace directory is not set; file access is disabled".into(),
                ))
            }
        };
        let expanded = expand_home(dir);
        let resolved = dunce::canonicalize(&expanded).map_err(|_| {
            AppError::NotConfigured(format!(
                "workspace directory '{}' does not exist or is not a directory",
                dir.display()
            ))
        })?;
        if !resolved.is_dir() {
            return Err(AppError::NotConfigured(format!(
                "workspace directory '{}' is not a directory",
                dir.display()
            )));
        }
        Ok(resolved)
    }

    /// Resolve `filename` to a canonical absolute path inside the workspace.
    ///
    /// Validation order, first violation wins:
    /// empty name, unconfigured workspace, absolute input, lexical `..`
    /// traversal, then containment of the symlink-resolved path. With
    /// `must_exist` the file must also be present on disk; the resulting
    /// error names the caller's input, not the resolved path.
    pub fn resolve_file(&self, filename: &str, must_exist: bool) -> AppResult<PathBuf> {
        if filename.trim().is_empty() {
            return Err(AppError::InvalidFilename("filename cannot be empty".into()));
        }

        let root = self.root()?;

        // Backslashes count as separators regardless of platform, so a
        // `..\` traversal string cannot slip past the lexical check on Unix.
        let unified = filename.replace('\\', "/");

        if is_absolute_input(filename, &unified) {
            tracing::debug!(filename, "rejected absolute path");
            return Err(AppError::AccessDenied(
                "absolute paths are not allowed; provide a filename or a relative path inside the workspace"
                    .into(),
            ));
        }

        let segments = normalize_segments(&unified)?;

        let mut joined = root.clone();
        for segment in &segments {
            joined.push(segment);
        }

        let resolved = canonicalize_existing_prefix(&joined)
            .map_err(|e| AppError::Internal(format!("failed to resolve '{filename}': {e}")))?;

        if !resolved.starts_with(&root) {
            tracing::warn!(filename, "path resolves outside the workspace");
            return Err(AppError::AccessDenied("file resolves outside the workspace".into()));
        }

        if must_exist && !resolved.exists() {
            return Err(AppError::NotFound(filename.to_string()));
        }

        Ok(resolved)
    }

    /// Strip the workspace prefix from an absolute path, returning only the
    /// relative filename.
    ///
    /// Used to sanitize every path placed in a tool response so the host
    /// filesystem layout is never disclosed. This never fails and never
    /// returns an absolute path: when the workspace is unconfigured or the
    /// path lies outside it, the final path component is returned instead.
    pub fn to_filename(&self, path: &Path) -> String {
        if path.as_os_str().is_empty() {
            return String::new();
        }
        if let Ok(root) = self.root() {
            if let Ok(rel) = path.strip_prefix(&root) {
                if !rel.as_os_str().is_empty() {
                    return rel.to_string_lossy().into_owned();
                }
            }
        }
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// True when [`Workspace::root`] would succeed. Lets hosts feature-gate
    /// file tools without handling the configuration error themselves.
    pub fn is_configured(&self) -> bool {
        self.root().is_ok()
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    if let Some(stripped) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    } else if s == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    path.to_path_buf()
}

fn is_absolute_input(raw: &str, unified: &str) -> bool {
    if Path::new(raw).is_absolute() || unified.starts_with('/') {
        return true;
    }
    // Drive designators ("C:", "C:/x") carry absolute intent even where the
    // platform path type treats them as relative.
    let bytes = unified.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Collapse `.` and `..` segments lexically, without touching the
/// filesystem. A `..` that would climb past the first segment means the
/// name tries to leave the workspace.
fn normalize_segments(unified: &str) -> AppResult<Vec<String>> {
    let mut segments: Vec<String> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    return Err(AppError::AccessDenied("path traversal is not allowed".into()));
                }
            }
            other => segments.push(other.to_string()),
        }
    }
    Ok(segments)
}

/// Canonicalize the deepest existing ancestor of `path`, then append the
/// not-yet-existing remainder lexically. The remainder is already free of
/// `..` segments, so appending it cannot climb out of the resolved prefix.
/// Dangling symlinks are chased so a link whose target does not exist yet
/// still resolves to wherever a write through it would land.
fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    let mut pending: Vec<OsString> = Vec::new();
    let mut hops = 0u32;
    loop {
        match dunce::canonicalize(&current) {
            Ok(mut resolved) => {
                while let Some(part) = pending.pop() {
                    resolved.push(part);
                }
                return Ok(resolved);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match std::fs::symlink_metadata(&current) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        hops += 1;
                        if hops > MAX_SYMLINK_HOPS {
                            return Err(io::Error::other("too many levels of symbolic links"));
                        }
                        let target = std::fs::read_link(&current)?;
                        current = if target.is_absolute() {
                            target
                        } else {
                            current.parent().map(|p| p.join(&target)).unwrap_or(target)
                        };
                    }
                    _ => {
                        let Some(name) = current.file_name().map(|n| n.to_os_string()) else {
                            return Err(err);
                        };
                        pending.push(name);
                        if !current.pop() {
                            return Err(err);
                        }
                    }
                }
            }
            Err(err) => return Err(err),
        }
    }
}
