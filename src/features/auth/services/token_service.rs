use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::JwtConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Issues and verifies HS256 session tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expire_hours: i64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            issuer: config.issuer.clone(),
            expire_hours: config.expire_hours,
            leeway_secs: config.leeway.as_secs(),
        }
    }

    /// Signs a token for the user. Returns the token together with its
    /// expiry as a unix timestamp.
    pub fn generate(&self, user_id: i64) -> Result<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expire_hours);

        let claims = Claims {
            user_id,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: user_id.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok((token, expires_at.timestamp()))
    }

    /// Verifies signature, expiry, not-before and issuer; extracts the
    /// user id claim.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = self.leeway_secs;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))?;

        Ok(AuthenticatedUser {
            id: token_data.claims.user_id,
        })
    }
}
