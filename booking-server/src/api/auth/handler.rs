//! Authentication Handlers
//!
//! Handles login, logout and discount-token minting

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use shared::client::{AuthTokenResponse, LoginRequest, LoginResponse, UserInfo};
use shared::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/sessions - Login
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = user::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match account {
        Some(a) => {
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(account.user_id, &account.username, &account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = account.user_id,
        username = %account.username,
        role = %account.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            user_id: account.user_id,
            username: account.username,
            role: account.role,
        },
    }))
}

/// GET /api/sessions/current - Current user info
pub async fn me(Extension(user): Extension<CurrentUser>) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo {
        user_id: user.id,
        username: user.username,
        role: user.role,
    }))
}

/// DELETE /api/sessions/current - Logout
///
/// Sessions are bearer JWTs, so logout is client-side token disposal;
/// the endpoint exists for API compatibility and audit logging.
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<serde_json::Value>> {
    tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    Ok(Json(serde_json::json!({})))
}

/// GET /api/auth-token - Mint a discount capability token
///
/// The token carries only the role claim and a 60-second expiry; the
/// discount service verifies it with nothing but the shared secret.
pub async fn auth_token(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AuthTokenResponse>> {
    let token = state
        .discount_tokens
        .mint(&user.role)
        .map_err(|e| AppError::internal(format!("Failed to mint discount token: {}", e)))?;

    Ok(Json(AuthTokenResponse { token }))
}
