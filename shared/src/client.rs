//! Client-related types shared between services and clients
//!
//! Common request/response types used in API communication. Field names
//! follow the wire format of the public API (camelCase keys where the
//! endpoints expose them).

use serde::{Deserialize, Serialize};

use crate::models::Seat;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

/// Discount capability token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    pub token: String,
}

// =============================================================================
// Reservation API DTOs
// =============================================================================

/// One seat in an explicit reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSelection {
    pub seat_id: i64,
}

/// Explicit reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub seats: Vec<SeatSelection>,
}

/// Explicit reservation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub message: String,
    #[serde(rename = "ticketId")]
    pub ticket_id: i64,
}

/// Random reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomReserveRequest {
    #[serde(rename = "numSeats")]
    pub num_seats: i64,
}

/// Random reservation response, includes the seats actually granted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomReserveResponse {
    pub message: String,
    #[serde(rename = "ticketId")]
    pub ticket_id: i64,
    #[serde(rename = "selectedSeats")]
    pub selected_seats: Vec<Seat>,
}

/// Reservation existence check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReservationResponse {
    pub reservation: bool,
}

/// Cancellation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub message: String,
    pub changes: u64,
}

// =============================================================================
// Discount API DTOs
// =============================================================================

/// Discount calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRequest {
    #[serde(rename = "rowSum")]
    pub row_sum: i64,
}

/// Discount calculation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountResponse {
    pub discount: i64,
}
