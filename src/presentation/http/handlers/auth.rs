//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{ChangePasswordRequest, LoginRequest, RandomPasswordRequest};
use crate::application::dto::response::{MessageResponse, RandomPasswordResponse, TokenResponse};
use crate::presentation::http::extractors::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let token = state.auth.login(&body.email, &body.password).await?;

    Ok(Json(TokenResponse::from(token)))
}

/// Close the caller's login session
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state.auth.logout(auth.email()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change the caller's password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    state
        .auth
        .change_password(auth.email(), &body.old_password, &body.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "password updated".into(),
    }))
}

/// Generate a random alphanumeric password
pub async fn random_password(
    State(state): State<AppState>,
    Json(body): Json<RandomPasswordRequest>,
) -> Result<Json<RandomPasswordResponse>, AppError> {
    let password = state.auth.random_password(body.length)?;
    Ok(Json(RandomPasswordResponse { password }))
}
