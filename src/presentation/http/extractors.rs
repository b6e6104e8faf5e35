//! Custom Extractors
//!
//! Axum extractors for authentication and request parsing.

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::domain::Identity;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Caller of a bearer-protected route: a valid token backed by a live
/// login session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn email(&self) -> &str {
        self.identity.email()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized("Missing authorization header".into()))?;

        let identity = state.auth.validate_token(bearer.token()).await?;

        Ok(AuthUser { identity })
    }
}
