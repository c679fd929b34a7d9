//! Reservation API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ticket;
use crate::reservation;
use crate::utils::validation::{parse_positive_id, validate_positive};
use shared::client::{
    CancelResponse, CheckReservationResponse, RandomReserveRequest, RandomReserveResponse,
    ReserveRequest, ReserveResponse,
};
use shared::models::TicketSummary;
use shared::{AppError, AppResult};

/// POST /api/concert/:id/reserve - 预订指定座位
pub async fn reserve(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ReserveRequest>,
) -> AppResult<Json<ReserveResponse>> {
    let concert_id = parse_positive_id(&id, "id")?;

    if payload.seats.is_empty() {
        return Err(AppError::validation(
            "body[seats]: must contain at least one seat",
        ));
    }
    for selection in &payload.seats {
        validate_positive(selection.seat_id, "seats.*.seat_id")?;
    }
    let seat_ids: Vec<i64> = payload.seats.iter().map(|s| s.seat_id).collect();

    let ticket_id = reservation::reserve(&state.pool, concert_id, user.id, &seat_ids).await?;

    Ok(Json(ReserveResponse {
        message: "Seats successfully reserved".to_string(),
        ticket_id,
    }))
}

/// POST /api/concert/:id/random-reserve - 随机预订指定数量的座位
pub async fn random_reserve(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<RandomReserveRequest>,
) -> AppResult<Json<RandomReserveResponse>> {
    let concert_id = parse_positive_id(&id, "id")?;
    validate_positive(payload.num_seats, "numSeats")?;

    let granted = reservation::reserve_random(
        &state.pool,
        concert_id,
        user.id,
        payload.num_seats as usize,
    )
    .await?;

    Ok(Json(RandomReserveResponse {
        message: "Seats successfully reserved".to_string(),
        ticket_id: granted.ticket_id,
        selected_seats: granted.seats,
    }))
}

/// GET /api/concert/:id/check-reservation - 查询当前用户是否已预订
pub async fn check_reservation(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<CheckReservationResponse>> {
    let concert_id = parse_positive_id(&id, "id")?;

    let reservation = ticket::has_reservation(&state.pool, user.id, concert_id).await?;

    Ok(Json(CheckReservationResponse { reservation }))
}

/// GET /api/ticketseat/:id/reservation - 当前用户的全部预订
///
/// 路径中的用户 ID 必须与当前登录用户一致
pub async fn my_reservations(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TicketSummary>>> {
    let requested_id = parse_positive_id(&id, "id")?;

    if requested_id != user.id {
        return Err(AppError::forbidden(
            "Unauthorized: You can only view your own reservations.",
        ));
    }

    let tickets = ticket::reservations_for_user(&state.pool, user.id).await?;
    Ok(Json(tickets))
}

/// DELETE /api/ticket/:id/delete - 取消预订并释放座位
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<CancelResponse>> {
    let ticket_id = parse_positive_id(&id, "id")?;

    let changes = reservation::cancel(&state.pool, ticket_id, user.id).await?;

    Ok(Json(CancelResponse {
        message: "Ticket and associated seats successfully deleted.".to_string(),
        changes,
    }))
}
