use crate::errors::AppError;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// The envelope every tool outcome is shaped into before it leaves the host.
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub successful: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObj>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObj {
    pub code: String,
    pub message: String,
}

impl ToolResponse {
    pub fn ok(data: Value) -> Self {
        Self { successful: true, data, error: None }
    }

    pub fn fail(err: &AppError) -> Self {
        Self {
            successful: false,
            data: json!({}),
            error: Some(ErrorObj { code: err.code().to_string(), message: err.to_string() }),
        }
    }

    pub fn from_result(result: Result<Value, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(&err),
        }
    }
}
