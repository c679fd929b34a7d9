//! Concert catalog API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/concerts", get(handler::list))
        .route("/api/concerts/{id}", get(handler::get_by_id))
        .route("/api/concert/{id}/seats", get(handler::seat_map))
}
