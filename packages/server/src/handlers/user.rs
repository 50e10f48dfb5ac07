use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::content::{self, Resume};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::language::RequestedLanguage;
use crate::models::shared::ListResponse;
use crate::models::user::{CreateUserRequest, UserResponse};
use crate::state::AppState;
use crate::store::UserStore;

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    description = "Creates a content owner. Usernames are 1-32 characters of letters, digits and underscores and must be unique.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserStore::new(&state.db)
        .create(&payload.username, payload.email)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users",
    responses(
        (status = 200, description = "Users ordered by id", body = ListResponse<UserResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<UserResponse>>, AppError> {
    let users = UserStore::new(&state.db).list().await?;
    Ok(Json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>()
            .into(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserStore::new(&state.db).get(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user and everything they own",
    description = "Deletes the user together with every content row they own, and those rows' translations and detail lines, in one transaction.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    UserStore::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/resume",
    tag = "Users",
    operation_id = "getResume",
    summary = "Get a user's resume",
    description = "Personal info, education, work experience, projects, research projects, publications and awards of one user, each resolved for the requested language with fallback to the default language.",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("lang" = Option<String>, Query, description = "Requested language"),
    ),
    responses(
        (status = 200, description = "Aggregated resume"),
        (status = 400, description = "Malformed language (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, lang), fields(id))]
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    RequestedLanguage(lang): RequestedLanguage,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(content::resume(&state.db, id, &lang).await?))
}
