use crate::{config::Config, errors::AppError, tools::registry::Tool, workspace::Workspace};
use async_trait::async_trait;
use base64::Engine;
use serde_json::json;
use std::fs;

/// Decode base64 content and write it to a guarded workspace path. This is
/// the local half of downloading an attachment to disk.
pub struct FileSaveTool {
    workspace: Workspace,
}

impl FileSaveTool {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self { workspace: Workspace::from_config(cfg) })
    }
}

#[async_trait]
impl Tool for FileSaveTool {
    fn name(&self) -> &'static str {
        "file_save"
    }

    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","required":["file_name","content_b64"],"properties": {"file_name": {"type":"string"},"content_b64":{"type":"string"},"overwrite":{"type":"boolean"}}}, "output": {"type":"object","properties": {"file_name":{"type":"string"},"size":{"type":"integer"}}}})
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let file_name = params
            .get("file_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::ToolError("missing file_name".into()))?;
        let content_b64 = params
            .get("content_b64")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::ToolError("missing content_b64".into()))?;
        let overwrite = params.get("overwrite").and_then(|v| v.as_bool()).unwrap_or(false);

        let full = self.workspace.resolve_file(file_name, false)?;
        if full.exists() && !overwrite {
            return Err(AppError::ToolError(format!(
                "file already exists: {}; pass overwrite=true to replace it",
                self.workspace.to_filename(&full)
            )));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(content_b64)
            .map_err(|_| AppError::ToolError("invalid base64 content".into()))?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Internal(e.to_string()))?;
        }
        fs::write(&full, &bytes).map_err(|e| AppError::Internal(e.to_string()))?;

        let relative = self.workspace.to_filename(&full);
        tracing::info!(file = %relative, size = bytes.len(), "file saved");
        Ok(json!({"file_name": relative, "size": bytes.len()}))
    }
}
