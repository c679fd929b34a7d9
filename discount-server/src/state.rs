use shared::DiscountTokenService;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Capability-token verification over the shared secret
    pub tokens: DiscountTokenService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tokens: DiscountTokenService::new(&config.token_secret),
        }
    }
}
