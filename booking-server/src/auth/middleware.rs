//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use shared::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (如 /health)
/// - `POST /api/sessions` (登录接口)
/// - 公共查询接口 (音乐会列表、详情、座位图)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Authentication failed");

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 公共 API 路由 (无需认证)
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    if method == http::Method::POST && path == "/api/sessions" {
        return true;
    }

    if method == http::Method::GET {
        // Concert catalog and seat maps are public
        if path == "/api/concerts" || path.starts_with("/api/concerts/") {
            return true;
        }
        if path.starts_with("/api/concert/") && path.ends_with("/seats") {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::is_public_api_route;
    use http::Method;

    #[test]
    fn catalog_and_seat_map_routes_are_public() {
        assert!(is_public_api_route(&Method::GET, "/api/concerts"));
        assert!(is_public_api_route(&Method::GET, "/api/concerts/3"));
        assert!(is_public_api_route(&Method::GET, "/api/concert/3/seats"));
        assert!(is_public_api_route(&Method::POST, "/api/sessions"));
    }

    #[test]
    fn mutating_and_session_scoped_routes_require_auth() {
        assert!(!is_public_api_route(&Method::POST, "/api/concert/3/reserve"));
        assert!(!is_public_api_route(
            &Method::POST,
            "/api/concert/3/random-reserve"
        ));
        assert!(!is_public_api_route(
            &Method::GET,
            "/api/concert/3/check-reservation"
        ));
        assert!(!is_public_api_route(&Method::DELETE, "/api/ticket/9/delete"));
        assert!(!is_public_api_route(&Method::GET, "/api/auth-token"));
        assert!(!is_public_api_route(&Method::GET, "/api/sessions/current"));
    }
}
