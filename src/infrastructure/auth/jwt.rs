//! JWT issuing and verification.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{Identity, TokenError, TokenVerifier, User};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Public profile of the token holder; `email` is mandatory
    pub user: serde_json::Value,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// HS256 codec shared by login (issuing) and the realtime handshake
/// (verification).
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_minutes: i64,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

impl JwtCodec {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            expiry_minutes: settings.access_token_expiry_minutes,
        }
    }

    /// Sign an access token for `user`.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        self.issue_payload(user.token_payload(), Utc::now())
    }

    /// Sign an arbitrary profile payload as if issued at `issued_at`.
    pub fn issue_payload(
        &self,
        payload: serde_json::Value,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let expires_at = issued_at + Duration::minutes(self.expiry_minutes);
        let claims = Claims {
            user: payload,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.expiry_minutes * 60,
        })
    }

    /// Decode and validate a token into the identity it carries.
    pub fn decode(&self, token: &str) -> Result<Identity, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            },
        )?;

        Identity::from_payload(data.claims.user).ok_or(TokenError::MissingEmail)
    }
}

#[async_trait]
impl TokenVerifier for JwtCodec {
    async fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.decode(token)
    }
}
