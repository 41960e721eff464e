//! matmap-errors - 统一错误处理
//!
//! 所有错误都可由用户重试恢复，没有会终止会话的致命错误

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// 表单或文件校验失败，在任何副作用之前被拒绝
    #[error("Validation error: {0}")]
    Validation(String),

    /// 图片上传失败，需要用户重新选择文件
    #[error("Upload error: {0}")]
    Upload(String),

    /// 远端材料数据提交失败，本地数据不回滚
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(String),

    /// 前置条件不满足，例如空库存导出
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        Self::FailedPrecondition(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 错误携带的原始消息，不含变体前缀，用于面向用户的反馈
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::Upload(m)
            | Self::Persistence(m)
            | Self::Database(m)
            | Self::FailedPrecondition(m)
            | Self::Internal(m) => m,
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Upload(_) => 502,
            Self::Persistence(_) => 502,
            Self::Database(_) => 500,
            Self::FailedPrecondition(_) => 412,
            Self::Internal(_) => 500,
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
