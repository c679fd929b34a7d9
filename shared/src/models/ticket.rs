//! Ticket Model

use serde::{Deserialize, Serialize};

/// A user's reservation summary: ticket, concert title and seat count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TicketSummary {
    pub ticket_id: i64,
    pub concert_name: String,
    pub seat_count: i64,
}
