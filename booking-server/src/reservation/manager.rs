//! Reservation Transaction Manager
//!
//! Orchestrates the check-and-commit protocol for explicit and random seat
//! selection and the release protocol for cancellation. Per-seat state
//! machine: `available ⇄ occupied`, transitions only through here.
//!
//! Every operation is one sqlx transaction, rolled back on drop, so no
//! partial effect survives any failure path. Explicit reservation and
//! cancellation issue their conditional UPDATE as the transaction's first
//! statement: the write lock is taken up front and concurrent writers
//! serialize on the connection's busy timeout instead of failing on a
//! later lock upgrade. The duplicate-reservation check runs inside the
//! same transaction, and the storage-layer `UNIQUE(user_id, concert_id)`
//! constraint backstops it at insert time.

use shared::models::{Seat, SeatStatus};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::repository::{RepoError, seat, ticket};

/// Reservation failure modes. Every variant leaves the seat, ticket and
/// ticket_seat invariants intact: partial effects are rolled back.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("No seats requested")]
    EmptySeatSelection,

    #[error("You already have a reservation for this concert.")]
    DuplicateReservation,

    #[error("Some seats are already occupied")]
    SeatConflict { occupied: Vec<i64> },

    #[error("Not enough available seats.")]
    InsufficientCapacity { requested: usize, available: usize },

    #[error("You do not own this ticket or it does not exist!")]
    NotOwner,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<ReservationError> for shared::AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::EmptySeatSelection => {
                shared::AppError::validation("seats must contain at least one seat_id")
            }
            ReservationError::DuplicateReservation => {
                shared::AppError::forbidden("You already have a reservation for this concert.")
            }
            ReservationError::SeatConflict { occupied } => {
                shared::AppError::seat_conflict(occupied)
            }
            ReservationError::InsufficientCapacity { .. } => {
                shared::AppError::invalid("Not enough available seats.")
            }
            ReservationError::NotOwner => shared::AppError::forbidden(
                "Unauthorized: You do not own this ticket or it does not exist!",
            ),
            ReservationError::Repo(e) => e.into(),
        }
    }
}

/// Outcome of a random reservation: the ticket and the seats granted
#[derive(Debug, Clone)]
pub struct RandomReservation {
    pub ticket_id: i64,
    pub seats: Vec<Seat>,
}

/// Reserve an explicit list of seats, all-or-nothing.
///
/// Returns the new ticket id. On any conflict the requested non-available
/// seats are reported and nothing is mutated: the conditional claim runs
/// first, and the transaction is rolled back whenever the duplicate gate
/// or the claim count rejects the attempt.
pub async fn reserve(
    pool: &SqlitePool,
    concert_id: i64,
    user_id: i64,
    seat_ids: &[i64],
) -> Result<i64, ReservationError> {
    let seat_ids = dedup(seat_ids);
    if seat_ids.is_empty() {
        return Err(ReservationError::EmptySeatSelection);
    }

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    // First statement of the transaction: take the write lock and claim
    let changed =
        seat::set_status_if(&mut tx, &seat_ids, SeatStatus::Available, SeatStatus::Occupied)
            .await?;

    // One reservation per user per concert; rolling back discards the claim
    if ticket::has_reservation(&mut *tx, user_id, concert_id).await? {
        return Err(ReservationError::DuplicateReservation);
    }

    if changed < seat_ids.len() as u64 {
        // Roll back before re-reading: the re-read must not see the seats
        // this very batch transitioned
        tx.rollback().await.map_err(RepoError::from)?;
        let occupied = occupied_subset(pool, &seat_ids).await?;
        return Err(ReservationError::SeatConflict { occupied });
    }

    let ticket_id = create_ticket(&mut tx, concert_id, user_id, &seat_ids).await?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        ticket_id,
        concert_id,
        user_id,
        seats = seat_ids.len(),
        "Reservation created"
    );

    Ok(ticket_id)
}

/// Reserve `num_seats` seats picked uniformly from the available set.
///
/// The sample is an unbiased partial Fisher–Yates shuffle. Because the
/// selection is made under this transaction's own read, a concurrent claim
/// can still race it; the same conditional-update guard catches that case
/// and fails the whole operation rather than granting a partial seat list.
pub async fn reserve_random(
    pool: &SqlitePool,
    concert_id: i64,
    user_id: i64,
    num_seats: usize,
) -> Result<RandomReservation, ReservationError> {
    if num_seats == 0 {
        return Err(ReservationError::EmptySeatSelection);
    }

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if ticket::has_reservation(&mut *tx, user_id, concert_id).await? {
        return Err(ReservationError::DuplicateReservation);
    }

    let mut available = seat::available_for_concert(&mut tx, concert_id).await?;
    if available.len() < num_seats {
        return Err(ReservationError::InsufficientCapacity {
            requested: num_seats,
            available: available.len(),
        });
    }

    let selected: Vec<Seat> = {
        use rand::seq::SliceRandom;
        let mut rng = rand::thread_rng();
        let (picked, _) = available.partial_shuffle(&mut rng, num_seats);
        picked.to_vec()
    };
    let seat_ids: Vec<i64> = selected.iter().map(|s| s.seat_id).collect();

    let changed =
        seat::set_status_if(&mut tx, &seat_ids, SeatStatus::Available, SeatStatus::Occupied)
            .await?;
    if changed < seat_ids.len() as u64 {
        // A concurrent reservation claimed one of the selected seats
        // between our read and the guard
        tx.rollback().await.map_err(RepoError::from)?;
        let occupied = occupied_subset(pool, &seat_ids).await?;
        return Err(ReservationError::SeatConflict { occupied });
    }

    let ticket_id = create_ticket(&mut tx, concert_id, user_id, &seat_ids).await?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        ticket_id,
        concert_id,
        user_id,
        seats = seat_ids.len(),
        "Random reservation created"
    );

    let seats = selected
        .into_iter()
        .map(|s| Seat {
            status: SeatStatus::Occupied,
            ..s
        })
        .collect();

    Ok(RandomReservation { ticket_id, seats })
}

/// Cancel a ticket, releasing exactly the seats linked to it.
///
/// Ownership is checked first; a missing ticket and a foreign ticket are
/// indistinguishable to the caller, so a second cancel of the same id
/// fails the same way. Returns the ticket-row change count.
pub async fn cancel(pool: &SqlitePool, ticket_id: i64, user_id: i64) -> Result<u64, ReservationError> {
    match ticket::owner_of(pool, ticket_id).await? {
        Some(owner) if owner == user_id => {}
        _ => return Err(ReservationError::NotOwner),
    }

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let released = seat::release_for_ticket(&mut tx, ticket_id).await?;
    ticket::delete_links(&mut tx, ticket_id).await?;
    let changes = ticket::delete(&mut tx, ticket_id, user_id).await?;

    if changes == 0 {
        // Lost a race with another cancel of the same ticket
        return Err(ReservationError::NotOwner);
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(ticket_id, user_id, released, "Reservation cancelled");

    Ok(changes)
}

/// Re-read the requested seats after rollback and list every one that is
/// not currently available (unknown ids included).
async fn occupied_subset(pool: &SqlitePool, seat_ids: &[i64]) -> Result<Vec<i64>, RepoError> {
    let mut conn = pool.acquire().await?;
    let statuses = seat::status_of(&mut conn, seat_ids).await?;
    let available: std::collections::HashSet<i64> = statuses
        .iter()
        .filter(|r| r.status == SeatStatus::Available)
        .map(|r| r.seat_id)
        .collect();
    Ok(seat_ids
        .iter()
        .copied()
        .filter(|id| !available.contains(id))
        .collect())
}

/// Create the ticket and its seat links inside the caller's transaction
async fn create_ticket(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    concert_id: i64,
    user_id: i64,
    seat_ids: &[i64],
) -> Result<i64, ReservationError> {
    let ticket_id = ticket::insert(tx, concert_id, user_id).await.map_err(|e| {
        match e {
            // UNIQUE(user_id, concert_id) fired: two requests by the same
            // user raced past the existence check
            RepoError::Duplicate(_) => ReservationError::DuplicateReservation,
            other => ReservationError::Repo(other),
        }
    })?;
    ticket::link_seats(tx, ticket_id, seat_ids).await?;
    Ok(ticket_id)
}

fn dedup(seat_ids: &[i64]) -> Vec<i64> {
    let mut ids = seat_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
