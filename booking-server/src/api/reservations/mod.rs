//! Reservation API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/concert/{id}/reserve", post(handler::reserve))
        .route(
            "/api/concert/{id}/random-reserve",
            post(handler::random_reserve),
        )
        .route(
            "/api/concert/{id}/check-reservation",
            get(handler::check_reservation),
        )
        .route(
            "/api/ticketseat/{id}/reservation",
            get(handler::my_reservations),
        )
        .route("/api/ticket/{id}/delete", delete(handler::cancel))
}
