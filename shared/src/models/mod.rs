//! Domain models shared between services

mod concert;
mod seat;
mod ticket;
mod user;

pub use concert::Concert;
pub use seat::{Seat, SeatMap, SeatStatus};
pub use ticket::TicketSummary;
pub use user::{LOYAL_ROLE, NORMAL_ROLE};
