//! User management controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, ok, ApiResponse, ApiResult, AppError, MessageResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{RosterError, UserId};
use roster_service::{UserData, UserResponse};
use tracing::debug;

/// Mount point of the user API.
pub const BASE_PATH: &str = "/user/api/v1";

/// Creates the user router.
///
/// The collection is reachable with and without the trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            &format!("{BASE_PATH}/"),
            get(list_users).post(create_user),
        )
        .route(BASE_PATH, get(list_users).post(create_user))
        .route(
            &format!("{BASE_PATH}/:id"),
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// List all users.
async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Create a new user.
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<UserData>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Create user request");

    let response = state.user_service.create_user(data).await?;
    Ok(created(response))
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Update a user.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<UserData>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_user(user_id, data).await?;
    ok(response)
}

/// Delete a user.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;

    ok(MessageResponse::new("User deleted successfully").with_id(user_id.into_inner()))
}

/// Parses a path segment as a user ID.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|e| AppError(RosterError::validation(format!("Invalid user ID '{}': {}", id, e))))
}
