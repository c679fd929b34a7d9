//! Seat Repository (the seat inventory store)
//!
//! Seat rows are created once by the migrations; `status` is the only
//! field anything here mutates. [`set_status_if`] is the atomic primitive
//! every reservation is built on: a single conditional UPDATE whose
//! affected-row count tells the caller whether the whole batch
//! transitioned. A separate check-then-update would admit a window where
//! two interleaved requests both observe `available` before either
//! commits.

use super::RepoResult;
use shared::models::{Seat, SeatMap, SeatStatus};
use sqlx::{SqliteConnection, SqlitePool};

/// Current status of one seat
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeatStatusRow {
    pub seat_id: i64,
    pub status: SeatStatus,
}

/// `?, ?, ?` placeholder list for an IN clause
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Seat map for a concert: rows ordered by (row, position) plus counts.
/// An unknown concert yields an empty map, not an error.
pub async fn seat_map(pool: &SqlitePool, concert_id: i64) -> RepoResult<SeatMap> {
    let rows = sqlx::query_as::<_, Seat>(
        "SELECT seat_id, row, position, status FROM seat
         WHERE concert_id = ? ORDER BY row, position",
    )
    .bind(concert_id)
    .fetch_all(pool)
    .await?;
    Ok(SeatMap::from_rows(rows))
}

/// Status of each requested seat id (missing ids simply yield no row)
pub async fn status_of(
    conn: &mut SqliteConnection,
    seat_ids: &[i64],
) -> RepoResult<Vec<SeatStatusRow>> {
    if seat_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT seat_id, status FROM seat WHERE seat_id IN ({})",
        placeholders(seat_ids.len())
    );
    let mut query = sqlx::query_as::<_, SeatStatusRow>(&sql);
    for id in seat_ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(conn).await?;
    Ok(rows)
}

/// All available seats of a concert, ordered by (row, position)
pub async fn available_for_concert(
    conn: &mut SqliteConnection,
    concert_id: i64,
) -> RepoResult<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(
        "SELECT seat_id, row, position, status FROM seat
         WHERE concert_id = ? AND status = ? ORDER BY row, position",
    )
    .bind(concert_id)
    .bind(SeatStatus::Available)
    .fetch_all(conn)
    .await?;
    Ok(seats)
}

/// Atomically transition the seats whose current status is `expected`.
///
/// One storage-level statement; returns how many rows actually changed.
/// Callers must treat a count smaller than the request as a failure of the
/// whole batch and roll the enclosing transaction back.
pub async fn set_status_if(
    conn: &mut SqliteConnection,
    seat_ids: &[i64],
    expected: SeatStatus,
    new_status: SeatStatus,
) -> RepoResult<u64> {
    if seat_ids.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "UPDATE seat SET status = ? WHERE seat_id IN ({}) AND status = ?",
        placeholders(seat_ids.len())
    );
    let mut query = sqlx::query(&sql).bind(new_status);
    for id in seat_ids {
        query = query.bind(id);
    }
    query = query.bind(expected);

    let result = query.execute(conn).await?;
    Ok(result.rows_affected())
}

/// Release every seat linked to a ticket back to `available`
pub async fn release_for_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE seat SET status = ?
         WHERE seat_id IN (SELECT seat_id FROM ticket_seat WHERE ticket_id = ?)",
    )
    .bind(SeatStatus::Available)
    .bind(ticket_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}
