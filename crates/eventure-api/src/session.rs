use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use thiserror::Error;
use uuid::Uuid;

use eventure_types::api::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token is invalid")]
    Invalid,
    #[error("Token has expired")]
    Expired,
}

/// Issues and resolves HS256 session tokens carrying the user id.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> anyhow::Result<String> {
        let exp = usize::try_from((Utc::now() + self.ttl).timestamp())
            .context("token expiry precedes the epoch")?;
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    pub fn resolve(&self, token: &str) -> Result<Claims, SessionError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid,
            })
    }
}
