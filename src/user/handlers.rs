use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::UserModel,
    service::UserService,
    types::{CreateUserRequest, UserQuery},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a user
///
/// POST /users
#[instrument(name = "create_user", skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserModel>), AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service.create_user(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// HTTP handler for looking up one user
///
/// GET /users?user_id=...
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserModel>, AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service.get_user(&query.user_id).await?;

    Ok(Json(user))
}

/// HTTP handler for listing all users
///
/// GET /users/list
#[instrument(name = "list_users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserModel>>, AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let users = service.list_users().await?;

    info!(user_count = users.len(), "Users listed successfully");
    Ok(Json(users))
}
