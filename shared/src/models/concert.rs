//! Concert Model

use serde::{Deserialize, Serialize};

/// Concert entity, immutable after seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Concert {
    pub concert_id: i64,
    pub title: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub theatre_id: i64,
}
