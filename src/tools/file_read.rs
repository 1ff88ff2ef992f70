use crate::{config::Config, errors::AppError, tools::registry::Tool, workspace::Workspace};
use async_trait::async_trait;
use base64::Engine;
use serde_json::json;
use std::fs;

/// Read a guarded workspace file and return its content as base64. This is
/// the local half of uploading an attachment from disk.
pub struct FileReadTool {
    workspace: Workspace,
}

impl FileReadTool {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self { workspace: Workspace::from_config(cfg) })
    }
}

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &'static str {
        "file_read"
    }

    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","required":["file_name"],"properties": {"file_name": {"type":"string"}}}, "output": {"type":"object","properties": {"file_name":{"type":"string"},"content_b64":{"type":"string"},"encoding":{"type":"string"},"size":{"type":"integer"}}}})
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let file_name = params
            .get("file_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::ToolError("missing file_name".into()))?;

        let full = self.workspace.resolve_file(file_name, true)?;
        if full.is_dir() {
            return Err(AppError::ToolError(format!("not a regular file: {file_name}")));
        }
        let data = fs::read(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(file_name.to_string())
            } else {
                AppError::Internal(e.to_string())
            }
        })?;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&data);

        let relative = self.workspace.to_filename(&full);
        tracing::info!(file = %relative, size = data.len(), "file read");
        Ok(json!({"file_name": relative, "content_b64": b64, "encoding": "base64", "size": data.len()}))
    }
}
