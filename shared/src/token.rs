//! Discount capability tokens
//!
//! The booking service mints a short-lived, role-scoped token; the discount
//! service verifies it independently. The two services share nothing but
//! the HS256 signing secret: the token carries no user identity and no
//! session state, only `{role, iat, exp}`.
//!
//! Expiry is checked with zero leeway so a token minted 61 seconds ago is
//! already [`TokenError::Expired`], and signature/expiry failures stay
//! distinguishable so callers can re-mint and retry instead of treating
//! the failure as a business error.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token time-to-live in seconds
pub const DISCOUNT_TOKEN_TTL_SECS: i64 = 60;

/// Claims carried by a discount capability token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountClaims {
    /// Role name ("loyal" or "normal")
    pub role: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiry timestamp (seconds)
    pub exp: i64,
}

/// Capability token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Mints and verifies discount capability tokens over a shared secret
#[derive(Clone)]
pub struct DiscountTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl DiscountTokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a token scoped to `role`, valid for [`DISCOUNT_TOKEN_TTL_SECS`]
    pub fn mint(&self, role: &str) -> Result<String, TokenError> {
        self.mint_at(role, Utc::now().timestamp())
    }

    fn mint_at(&self, role: &str, issued_at: i64) -> Result<String, TokenError> {
        let claims = DiscountClaims {
            role: role.to_string(),
            iat: issued_at,
            exp: issued_at + DISCOUNT_TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<DiscountClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        // 过期判定不允许时钟宽限
        validation.leeway = 0;

        let token_data =
            decode::<DiscountClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::Invalid("invalid signature".into()),
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-discount-secret-test-discount-secret";

    #[test]
    fn mint_and_verify_roundtrip() {
        let service = DiscountTokenService::new(SECRET);
        let token = service.mint("loyal").expect("Failed to mint token");
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.role, "loyal");
        assert_eq!(claims.exp - claims.iat, DISCOUNT_TOKEN_TTL_SECS);
    }

    #[test]
    fn token_minted_61_seconds_ago_is_expired() {
        let service = DiscountTokenService::new(SECRET);
        let token = service
            .mint_at("normal", Utc::now().timestamp() - 61)
            .expect("Failed to mint token");

        match service.verify(&token) {
            Err(TokenError::Expired) => {}
            other => panic!("expected Expired, got {:?}", other.map(|c| c.role)),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid_not_expired() {
        let service = DiscountTokenService::new(SECRET);
        let other = DiscountTokenService::new("another-secret-another-secret-12345678");
        let token = other.mint("loyal").expect("Failed to mint token");

        match service.verify(&token) {
            Err(TokenError::Invalid(_)) => {}
            other => panic!("expected Invalid, got {:?}", other.map(|c| c.role)),
        }
    }

    #[test]
    fn extract_from_header_strips_bearer_prefix() {
        assert_eq!(
            DiscountTokenService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(DiscountTokenService::extract_from_header("abc.def.ghi"), None);
    }
}
