//! Seat Model
//!
//! A seat is the smallest reservable unit, identified by concert + row +
//! position. `status` is the only mutable field; every transition goes
//! through the reservation transaction manager.

use serde::{Deserialize, Serialize};

/// Seat status; the full lifecycle is `available ⇄ occupied`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SeatStatus {
    Available,
    Occupied,
}

/// Seat entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Seat {
    pub seat_id: i64,
    pub row: i64,
    pub position: i64,
    pub status: SeatStatus,
}

/// Seat map for one concert: seats grouped into rows plus aggregate counts
///
/// Row index is derived from the seat's row number (row 1 → index 0), so
/// the grouping is stable regardless of input order gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub seats: Vec<Vec<Seat>>,
    #[serde(rename = "totalSeats")]
    pub total_seats: usize,
    #[serde(rename = "availableSeats")]
    pub available_seats: usize,
    #[serde(rename = "occupiedSeats")]
    pub occupied_seats: usize,
}

impl SeatMap {
    /// Build a seat map from seat rows ordered by (row, position).
    ///
    /// An unknown concert simply yields an empty map.
    pub fn from_rows(rows: Vec<Seat>) -> Self {
        let total_seats = rows.len();
        let available_seats = rows
            .iter()
            .filter(|s| s.status == SeatStatus::Available)
            .count();
        let occupied_seats = total_seats - available_seats;

        let mut seats: Vec<Vec<Seat>> = Vec::new();
        for seat in rows {
            let idx = (seat.row.max(1) as usize) - 1;
            if seats.len() <= idx {
                seats.resize_with(idx + 1, Vec::new);
            }
            seats[idx].push(seat);
        }

        Self {
            seats,
            total_seats,
            available_seats,
            occupied_seats,
        }
    }
}
