use axum::Json;
use axum::extract::{Path, State};
use common::LanguageCode;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::language::LanguageResponse;
use crate::models::shared::ListResponse;
use crate::state::AppState;
use crate::store::LanguageRegistry;

#[utoipa::path(
    get,
    path = "/",
    tag = "Languages",
    operation_id = "listLanguages",
    summary = "List active languages",
    description = "Returns every active language content may be translated into, ordered by code.",
    responses(
        (status = 200, description = "Active languages", body = ListResponse<LanguageResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_languages(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<LanguageResponse>>, AppError> {
    let rows = LanguageRegistry::new(&state.db).list_active().await?;
    Ok(Json(
        rows.into_iter()
            .map(LanguageResponse::from)
            .collect::<Vec<_>>()
            .into(),
    ))
}

#[utoipa::path(
    get,
    path = "/{code}",
    tag = "Languages",
    operation_id = "getLanguage",
    summary = "Get a language by code",
    params(("code" = String, Path, description = "Language code, e.g. `en`")),
    responses(
        (status = 200, description = "Language", body = LanguageResponse),
        (status = 400, description = "Malformed code (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown language (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(code = %code))]
pub async fn get_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LanguageResponse>, AppError> {
    let code = parse_code(&code)?;
    let row = LanguageRegistry::new(&state.db).get(&code).await?;
    Ok(Json(row.into()))
}

/// Parse a language code taken from the request path.
pub(crate) fn parse_code(raw: &str) -> Result<LanguageCode, AppError> {
    LanguageCode::parse(raw).map_err(|e| AppError::Validation {
        field: Some("lang"),
        message: e.to_string(),
    })
}
