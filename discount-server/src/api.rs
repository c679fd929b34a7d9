//! HTTP API: token-gated discount calculation
//!
//! The service trusts callers only via the bearer capability token minted
//! by the booking service; signature and expiry failures surface with
//! distinct error codes so clients can re-mint and retry.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::discount::calculate_discount;
use crate::state::AppState;
use shared::client::{DiscountRequest, DiscountResponse};
use shared::{AppError, AppResult, DiscountClaims, DiscountTokenService, TokenError};

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/calculate-discount", post(calculate))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 令牌验证中间件
///
/// 验证成功后将 [`DiscountClaims`] 注入请求扩展
async fn require_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => DiscountTokenService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => return Err(AppError::unauthorized()),
    };

    match state.tokens.verify(token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(TokenError::Expired) => {
            tracing::warn!(target: "security", "Discount token expired");
            Err(AppError::token_expired())
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, "Discount token rejected");
            Err(AppError::invalid_token("Invalid token"))
        }
    }
}

/// POST /api/calculate-discount
async fn calculate(
    axum::Extension(claims): axum::Extension<DiscountClaims>,
    Json(req): Json<DiscountRequest>,
) -> AppResult<Json<DiscountResponse>> {
    if req.row_sum < 1 {
        return Err(AppError::Invalid(vec![
            "body[rowSum]: must be a positive integer".to_string(),
        ]));
    }

    let discount = calculate_discount(req.row_sum, &claims.role);

    tracing::info!(row_sum = req.row_sum, role = %claims.role, discount, "Discount calculated");

    Ok(Json(DiscountResponse { discount }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
