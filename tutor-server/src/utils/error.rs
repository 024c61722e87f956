//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`]，引擎层所有违规都以带类型的错误上抛，
//! 不做内部重试。
//!
//! # 错误码规范
//!
//! | 错误码 | 分类 | 说明 |
//! |--------|------|------|
//! | E0002 | 验证错误 | 输入字段缺失或超长 |
//! | E0003 | 资源不存在 | 实体 ID 无法解析 |
//! | E0004 | 资源冲突 | 唯一性约束冲突（重复订单/重复评价） |
//! | E0005 | 状态非法 | 当前状态下不允许该转换 |
//! | E2001 | 权限错误 | 操作者对该实体无权限 |
//! | E9002 | 数据库错误 | 存储层故障 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order not found"))
//! ```

use tracing::error;

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | 说明 |
/// |------|------|
/// | 权限错误 | 操作者不是订单学生/课程教师/资质所有者 |
/// | 业务逻辑错误 | 资源不存在、验证失败、状态机违规、唯一性冲突 |
/// | 系统错误 | 数据库错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 权限错误 ==========
    #[error("Permission denied: {0}")]
    /// 无权限 (403)
    Forbidden(String),

    // ========== 业务逻辑错误 ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource conflict: {0}")]
    /// 唯一性冲突 (409)
    Conflict(String),

    #[error("Invalid state: {0}")]
    /// 状态机违规 (422)
    InvalidState(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    // ========== 系统错误 ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),
}

impl AppError {
    /// Stable error code, preserved end-to-end for callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "E0002",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::InvalidState(_) => "E0005",
            AppError::Forbidden(_) => "E2001",
            AppError::Database(_) => "E9002",
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        error!(target: "database", error = %msg, "Database error occurred");
        Self::Database(msg)
    }
}
