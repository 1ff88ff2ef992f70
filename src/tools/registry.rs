use crate::{config::Config, errors::AppError, tools::types::ToolInfo};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTool = Arc<dyn Tool + Send + Sync + 'static>;

#[async_trait]
pub trait Tool {
    fn name(&self) -> &'static str;
    fn capabilities(&self) -> serde_json::Value;
    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError>;
}

#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<(String, DynTool)>,
}

impl ToolRegistry {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        use crate::tools::{
            file_read::FileReadTool, file_save::FileSaveTool, status::WorkspaceStatusTool,
        };
        let mut tools: Vec<(String, DynTool)> = vec![
            ("file_read".to_string(), Arc::new(FileReadTool::new(cfg)?)),
            ("file_save".to_string(), Arc::new(FileSaveTool::new(cfg)?)),
            ("workspace_status".to_string(), Arc::new(WorkspaceStatusTool::new(cfg)?)),
        ];
        tools.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self { tools })
    }

    pub fn get(&self, name: &str) -> Option<DynTool> {
        self.tools.iter().find(|(n, _)| n == name).map(|(_, t)| t.clone())
    }

    pub fn list_names(&self) -> Vec<String> {
        self.tools.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Capability listing for host discovery endpoints.
    pub fn tool_infos(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|(n, t)| {
                let caps = t.capabilities();
                ToolInfo {
                    name: n.clone(),
                    input_schema: caps["input"].clone(),
                    output_schema: caps["output"].clone(),
                }
            })
            .collect()
    }
}
