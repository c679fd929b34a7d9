//! Auth API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/sessions", post(handler::login))
        .route(
            "/api/sessions/current",
            get(handler::me).delete(handler::logout),
        )
        .route("/api/auth-token", get(handler::auth_token))
}
