use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use userbase_core::{AppError, ErrorResponse, ListOptions, ListOptionsQuery};
use uuid::Uuid;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User};
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid input or email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let created = state.users.create(dto).await?;

    let user = state
        .users
        .get_one(created.id)
        .await?
        .ok_or_else(|| AppError::internal(anyhow!("User {} vanished after creation", created.id)))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users with pagination, sorting and equality filters
#[utoipa::path(
    get,
    path = "/users",
    params(ListOptionsQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 400, description = "Unknown sort or filter field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<ListOptionsQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let options = ListOptions::from(&query);
    let users = state.users.get_list(&options).await?;
    Ok(Json(users))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = state.users.get_one(id).await?.ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// Replace a user's fields, optionally changing the password
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Invalid input or email already in use", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = state.users.update(id, dto).await?.ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.users.delete(id).await? {
        return Err(user_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
