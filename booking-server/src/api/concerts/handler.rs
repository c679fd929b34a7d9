//! Concert API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{concert, seat};
use crate::utils::validation::parse_positive_id;
use shared::models::{Concert, SeatMap};
use shared::{AppError, AppResult};

/// GET /api/concerts - 获取所有音乐会 (最新日期在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Concert>>> {
    let concerts = concert::find_all(&state.pool).await?;
    Ok(Json(concerts))
}

/// GET /api/concerts/:id - 获取单个音乐会
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Concert>> {
    let id = parse_positive_id(&id, "id")?;
    let concert = concert::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Concert {} not found", id)))?;
    Ok(Json(concert))
}

/// GET /api/concert/:id/seats - 获取音乐会座位图
///
/// 未知音乐会返回空座位图而非错误
pub async fn seat_map(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SeatMap>> {
    let id = parse_positive_id(&id, "id")?;
    let map = seat::seat_map(&state.pool, id).await?;
    Ok(Json(map))
}
