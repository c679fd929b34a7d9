//! Ticket Repository (ticket lifecycle)
//!
//! Ticket and ticket_seat rows are created together inside one reservation
//! transaction and destroyed together inside one cancellation transaction;
//! only the reservation manager calls the mutating functions here.

use super::RepoResult;
use shared::models::TicketSummary;
use shared::util::now_millis;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

/// Whether the user already holds a ticket for this concert.
///
/// Runs on the reservation transaction's connection so the check and the
/// subsequent seat mutation share one isolated transaction; the
/// `UNIQUE(user_id, concert_id)` constraint backstops it at insert time.
pub async fn has_reservation<'e>(
    executor: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
    concert_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM ticket WHERE user_id = ? AND concert_id = ?",
    )
    .bind(user_id)
    .bind(concert_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

/// Insert a ticket, returning its id
pub async fn insert(conn: &mut SqliteConnection, concert_id: i64, user_id: i64) -> RepoResult<i64> {
    let ticket_id: i64 = sqlx::query_scalar(
        "INSERT INTO ticket (concert_id, user_id, created_at) VALUES (?, ?, ?)
         RETURNING ticket_id",
    )
    .bind(concert_id)
    .bind(user_id)
    .bind(now_millis())
    .fetch_one(conn)
    .await?;
    Ok(ticket_id)
}

/// Link the granted seats to a ticket (one statement)
pub async fn link_seats(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    seat_ids: &[i64],
) -> RepoResult<()> {
    if seat_ids.is_empty() {
        return Ok(());
    }

    let values = vec!["(?, ?)"; seat_ids.len()].join(", ");
    let sql = format!("INSERT INTO ticket_seat (ticket_id, seat_id) VALUES {values}");
    let mut query = sqlx::query(&sql);
    for id in seat_ids {
        query = query.bind(ticket_id).bind(id);
    }
    query.execute(conn).await?;
    Ok(())
}

/// Owner of a ticket, `None` if the ticket does not exist
pub async fn owner_of(pool: &SqlitePool, ticket_id: i64) -> RepoResult<Option<i64>> {
    let owner: Option<i64> =
        sqlx::query_scalar("SELECT user_id FROM ticket WHERE ticket_id = ?")
            .bind(ticket_id)
            .fetch_optional(pool)
            .await?;
    Ok(owner)
}

/// Delete the seat links of a ticket
pub async fn delete_links(conn: &mut SqliteConnection, ticket_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM ticket_seat WHERE ticket_id = ?")
        .bind(ticket_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete a ticket owned by `user_id`, returning the affected-row count
pub async fn delete(conn: &mut SqliteConnection, ticket_id: i64, user_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM ticket WHERE ticket_id = ? AND user_id = ?")
        .bind(ticket_id)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// The user's reservations with concert title and seat count
pub async fn reservations_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<TicketSummary>> {
    let tickets = sqlx::query_as::<_, TicketSummary>(
        "SELECT t.ticket_id, c.title AS concert_name, COUNT(ts.ticket_seat_id) AS seat_count
         FROM ticket t
         LEFT JOIN ticket_seat ts ON t.ticket_id = ts.ticket_id
         LEFT JOIN concert c ON t.concert_id = c.concert_id
         WHERE t.user_id = ?
         GROUP BY t.ticket_id, c.title",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(tickets)
}
