//! User Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::{UserListResponse, UserResponse, UserSearchResponse};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Create a user account
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let user = state.users.create_user(body.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List every user account
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(UserListResponse::from(users)))
}

/// Update name/lastname of the account identified by email
pub async fn update_user(
    State(state): State<AppState>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let user = state.users.update_user(body.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user account by id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    // Malformed ids cannot exist in the store
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound("User not found".into()))?;

    let user = state.users.delete_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Look a user up by email
pub async fn search_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserSearchResponse>, AppError> {
    let user = state.users.search_by_email(&email).await?;
    Ok(Json(UserSearchResponse::from(user)))
}
