//! Reservation transaction management
//!
//! The only component allowed to transition seats between `available` and
//! `occupied`. Every operation is one atomic transaction.

pub mod manager;

pub use manager::{RandomReservation, ReservationError, cancel, reserve, reserve_random};
