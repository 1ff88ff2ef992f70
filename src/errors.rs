use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("workspace not configured: {0}")]
    NotConfigured(String),
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("file not found in workspace: {0}")]
    NotFound(String),
    #[error("tool error: {0}")]
    ToolError(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotConfigured(_) => "NotConfigured",
            AppError::InvalidFilename(_) => "InvalidFilename",
            AppError::AccessDenied(_) => "AccessDenied",
            AppError::NotFound(_) => "NotFound",
            AppError::ToolError(_) => "ToolError",
            AppError::Internal(_) => "Internal",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
