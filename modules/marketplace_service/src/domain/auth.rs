//! Credentials and session tokens

use crate::contract::{AuthContext, IssuedToken, MarketplaceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Slow salted one-way password hash
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    /// False on mismatch or on an unreadable stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub is_admin: bool,
    pub exp: i64,
}

/// HS256 token issuer and verifier
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, user_id: i32, is_admin: bool) -> Result<IssuedToken, MarketplaceError> {
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            user_id,
            is_admin,
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| MarketplaceError::internal(e.into()))?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<AuthContext, MarketplaceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| MarketplaceError::unauthorized(format!("invalid token: {}", e)))?;
        Ok(AuthContext {
            user_id: data.claims.user_id,
            is_admin: data.claims.is_admin,
        })
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_header(&self, header: Option<&str>) -> Result<AuthContext, MarketplaceError> {
        let header =
            header.ok_or_else(|| MarketplaceError::unauthorized("missing authorization header"))?;
        let parts: Vec<&str> = header.split(' ').collect();
        match parts.as_slice() {
            ["Bearer", token] => self.verify(token),
            _ => Err(MarketplaceError::unauthorized(
                "authorization header must be 'Bearer <token>'",
            )),
        }
    }
}
