use crate::{config::Config, errors::AppError, tools::registry::Tool, workspace::Workspace};
use async_trait::async_trait;
use serde_json::json;

/// Report whether the workspace is configured, without disclosing where it
/// is. Hosts use this to feature-gate the file tools.
pub struct WorkspaceStatusTool {
    workspace: Workspace,
}

impl WorkspaceStatusTool {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self { workspace: Workspace::from_config(cfg) })
    }
}

#[async_trait]
impl Tool for WorkspaceStatusTool {
    fn name(&self) -> &'static str {
        "workspace_status"
    }

    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","properties": {}}, "output": {"type":"object","properties": {"configured":{"type":"boolean"}}}})
    }

    async fn call(&self, _params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        Ok(json!({"configured": self.workspace.is_configured()}))
    }
}
