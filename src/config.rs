use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceSection,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WorkspaceSection {
    /// Directory all file tools are confined to. Leave unset to disable
    /// file access entirely; the host keeps running either way.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// An unset or dangling workspace directory is tolerated (file tools
    /// fail closed per call), so this only surfaces a warning.
    pub fn validate(&self) {
        let workspace = crate::workspace::Workspace::from_config(self);
        if let Err(err) = workspace.root() {
            tracing::warn!(error = %err, "file access tools are disabled");
        }
    }
}
