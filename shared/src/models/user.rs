//! User roles

/// Loyalty tier role name, grants the full row-sum discount base
pub const LOYAL_ROLE: &str = "loyal";

/// Default role name
pub const NORMAL_ROLE: &str = "normal";
