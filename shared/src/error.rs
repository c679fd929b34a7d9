//! 统一错误处理
//!
//! 两个服务共用的应用级错误类型和错误响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`ErrorBody`] - 错误响应结构
//!
//! # 错误码规范
//!
//! | 错误码 | HTTP | 说明 |
//! |--------|------|------|
//! | E0002 | 422 | 输入验证失败 |
//! | E0003 | 404 | 资源不存在 |
//! | E0004 | 409 | 座位已被占用 |
//! | E0006 | 400 | 无效请求 |
//! | E1001 | 401 | 用户名或密码错误 |
//! | E2001 | 403 | 无权限 |
//! | E3001 | 401 | 未登录 |
//! | E3002 | 401 | 无效令牌 |
//! | E3003 | 401 | 令牌过期 |
//! | E9001 | 500 | 内部错误 |
//! | E9002 | 500 | 数据库错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error response body
///
/// `occupiedSeats` is present only on seat-conflict responses, `errors`
/// only on validation failures. The `error` key carries the human-readable
/// message for every failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误码 (如 E0004)
    pub code: String,
    /// 错误消息
    pub error: String,
    /// 冲突座位列表 (仅 409)
    #[serde(rename = "occupiedSeats", skip_serializing_if = "Option::is_none")]
    pub occupied_seats: Option<Vec<i64>>,
    /// 验证错误列表 (仅 400/422)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Some seats are already occupied")]
    SeatConflict { occupied: Vec<i64> },

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Invalid request")]
    Invalid(Vec<String>),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E1001"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "E3002"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "E2001"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),
            AppError::SeatConflict { .. } => (StatusCode::CONFLICT, "E0004"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E0002"),
            AppError::Invalid(_) => (StatusCode::BAD_REQUEST, "E0006"),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9001")
            }
        };

        // 5xx 不向客户端泄露内部细节
        let message = match &self {
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let occupied_seats = match &self {
            AppError::SeatConflict { occupied } => Some(occupied.clone()),
            _ => None,
        };

        let errors = match self {
            AppError::Validation(list) | AppError::Invalid(list) => Some(list),
            _ => None,
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            error: message,
            occupied_seats,
            errors,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// Create an invalid credentials error with unified message
    /// Used to prevent username enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken(message.into())
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn seat_conflict(occupied: Vec<i64>) -> Self {
        Self::SeatConflict { occupied }
    }

    /// Single-message validation error (422)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Single-message bad request (400)
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(vec![message.into()])
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result type for API operations
pub type AppResult<T> = Result<T, AppError>;
