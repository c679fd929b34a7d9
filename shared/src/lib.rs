//! Shared types for the concert booking platform
//!
//! Common types used by both services: domain models, API request/response
//! DTOs, the unified error system, and the discount capability-token layer
//! that couples booking-server and discount-server through nothing but a
//! signing secret.

pub mod client;
pub mod error;
pub mod models;
pub mod token;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody};
pub use serde::{Deserialize, Serialize};
pub use token::{DiscountClaims, DiscountTokenService, TokenError};
