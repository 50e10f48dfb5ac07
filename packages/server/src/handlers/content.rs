//! Handlers shared by every content kind.
//!
//! Each handler is generic over the kind's table and is instantiated once
//! per kind by the router. Detail handlers are generic over the detail table
//! and only mounted for kinds that have detail lines.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::content::{self, LocalizedView, ViewOptions};
use crate::error::AppError;
use crate::extractors::json::AppJson;
use crate::extractors::language::RequestedLanguage;
use crate::handlers::language::parse_code;
use crate::models::content::{
    CreateContentRequest, CreateDetailRequest, GetQuery, ListQuery, UpdateDetailRequest,
};
use crate::models::shared::ListResponse;
use crate::state::AppState;
use crate::store::translation::ensure_parent;
use crate::store::{
    ContentStore, ContentTable, DetailBundle, DetailStore, DetailTable, DetailText, Keyed, StoreError,
    TranslationRecord, TranslationStore, TranslationTable,
};

type Text<K> = <<K as ContentTable>::Translation as TranslationTable>::Text;

#[instrument(skip(state, lang, query), fields(kind = K::KIND, owner_id = query.owner_id))]
pub async fn list<K: ContentTable>(
    State(state): State<AppState>,
    RequestedLanguage(lang): RequestedLanguage,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<LocalizedView<K::View>>>, AppError> {
    let views =
        content::list_views::<K, _>(&state.db, query.owner_id, &lang, query.view_options()).await?;
    Ok(Json(views.into()))
}

/// Create a row and its initial translations, answering with the row as
/// rendered for the request's language.
#[instrument(skip(state, lang, payload), fields(kind = K::KIND, owner_id = payload.user_id))]
pub async fn create<K: ContentTable>(
    State(state): State<AppState>,
    RequestedLanguage(lang): RequestedLanguage,
    AppJson(payload): AppJson<CreateContentRequest<K::Fields, Text<K>>>,
) -> Result<impl IntoResponse, AppError> {
    let row = content::create_with_translations::<K, _>(
        &state.db,
        payload.user_id,
        payload.fields,
        payload.translations.into_iter().collect(),
    )
    .await?;

    let view =
        content::get_view::<K, _>(&state.db, K::id(&row), &lang, ViewOptions::default()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[instrument(skip(state, lang, query), fields(kind = K::KIND, id))]
pub async fn get<K: ContentTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    RequestedLanguage(lang): RequestedLanguage,
    Query(query): Query<GetQuery>,
) -> Result<Json<LocalizedView<K::View>>, AppError> {
    let view = content::get_view::<K, _>(&state.db, id, &lang, query.view_options()).await?;
    Ok(Json(view))
}

/// Partially update the canonical fields. An empty payload returns the
/// current row unchanged.
#[instrument(skip(state, lang, payload), fields(kind = K::KIND, id))]
pub async fn update<K: ContentTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    RequestedLanguage(lang): RequestedLanguage,
    AppJson(payload): AppJson<K::Patch>,
) -> Result<Json<LocalizedView<K::View>>, AppError> {
    ContentStore::<K, _>::new(&state.db)
        .update(id, payload)
        .await?;
    let view = content::get_view::<K, _>(&state.db, id, &lang, ViewOptions::default()).await?;
    Ok(Json(view))
}

#[instrument(skip(state), fields(kind = K::KIND, id))]
pub async fn delete<K: ContentTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContentStore::<K, _>::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), fields(kind = K::KIND, id))]
pub async fn list_translations<K: ContentTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ListResponse<TranslationRecord<Text<K>>>>, AppError> {
    ContentStore::<K, _>::new(&state.db).get(id).await?;
    let rows = TranslationStore::<K::Translation, _>::new(&state.db)
        .list_for_entity(id)
        .await?;
    Ok(Json(
        rows.iter()
            .map(TranslationRecord::from_row::<K::Translation>)
            .collect::<Vec<_>>()
            .into(),
    ))
}

#[instrument(skip(state), fields(kind = K::KIND, id, lang = %lang))]
pub async fn get_translation<K: ContentTable>(
    State(state): State<AppState>,
    Path((id, lang)): Path<(i32, String)>,
) -> Result<Json<TranslationRecord<Text<K>>>, AppError> {
    let lang = parse_code(&lang)?;
    ContentStore::<K, _>::new(&state.db).get(id).await?;
    let row = TranslationStore::<K::Translation, _>::new(&state.db)
        .get(id, &lang)
        .await?;
    Ok(Json(TranslationRecord::from_row::<K::Translation>(&row)))
}

/// Insert or wholesale-replace the translation of one row in one language.
#[instrument(skip(state, payload), fields(kind = K::KIND, id, lang = %lang))]
pub async fn put_translation<K: ContentTable>(
    State(state): State<AppState>,
    Path((id, lang)): Path<(i32, String)>,
    AppJson(payload): AppJson<Text<K>>,
) -> Result<Json<TranslationRecord<Text<K>>>, AppError> {
    let lang = parse_code(&lang)?;
    let row = TranslationStore::<K::Translation, _>::new(&state.db)
        .upsert(id, &lang, payload)
        .await?;
    Ok(Json(TranslationRecord::from_row::<K::Translation>(&row)))
}

#[instrument(skip(state), fields(kind = K::KIND, id, lang = %lang))]
pub async fn delete_translation<K: ContentTable>(
    State(state): State<AppState>,
    Path((id, lang)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let lang = parse_code(&lang)?;
    ContentStore::<K, _>::new(&state.db).get(id).await?;
    TranslationStore::<K::Translation, _>::new(&state.db)
        .delete(id, &lang)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Detail lines of one row, each with every translation it has.
#[instrument(skip(state), fields(parent = D::Parent::LABEL, id))]
pub async fn list_details<D: DetailTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ListResponse<DetailBundle>>, AppError> {
    ensure_parent::<D::Parent, _>(&state.db, id).await?;
    let mut lines = DetailStore::<D, _>::new(&state.db).load(&[id]).await?;
    Ok(Json(lines.remove(&id).unwrap_or_default().into()))
}

#[instrument(skip(state, payload), fields(parent = D::Parent::LABEL, id))]
pub async fn create_detail<D: DetailTable>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CreateDetailRequest>,
) -> Result<impl IntoResponse, AppError> {
    let store = DetailStore::<D, _>::new(&state.db);
    let detail = store
        .create(id, payload.position, payload.translations.into_iter().collect())
        .await?;
    let bundle = find_bundle(&store, id, D::id(&detail)).await?;
    Ok((StatusCode::CREATED, Json(bundle)))
}

/// Move a detail line to another position.
#[instrument(skip(state, payload), fields(parent = D::Parent::LABEL, id, detail_id))]
pub async fn update_detail<D: DetailTable>(
    State(state): State<AppState>,
    Path((id, detail_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateDetailRequest>,
) -> Result<Json<DetailBundle>, AppError> {
    let store = DetailStore::<D, _>::new(&state.db);
    store.set_position(id, detail_id, payload.position).await?;
    Ok(Json(find_bundle(&store, id, detail_id).await?))
}

#[instrument(skip(state), fields(parent = D::Parent::LABEL, id, detail_id))]
pub async fn delete_detail<D: DetailTable>(
    State(state): State<AppState>,
    Path((id, detail_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    DetailStore::<D, _>::new(&state.db)
        .delete(id, detail_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, payload), fields(parent = D::Parent::LABEL, id, detail_id, lang = %lang))]
pub async fn put_detail_translation<D: DetailTable>(
    State(state): State<AppState>,
    Path((id, detail_id, lang)): Path<(i32, i32, String)>,
    AppJson(payload): AppJson<DetailText>,
) -> Result<Json<TranslationRecord<DetailText>>, AppError> {
    let lang = parse_code(&lang)?;
    DetailStore::<D, _>::new(&state.db)
        .get_for_parent(id, detail_id)
        .await?;
    let row = TranslationStore::<D::Translation, _>::new(&state.db)
        .upsert(detail_id, &lang, payload)
        .await?;
    Ok(Json(TranslationRecord::from_row::<D::Translation>(&row)))
}

#[instrument(skip(state), fields(parent = D::Parent::LABEL, id, detail_id, lang = %lang))]
pub async fn delete_detail_translation<D: DetailTable>(
    State(state): State<AppState>,
    Path((id, detail_id, lang)): Path<(i32, i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let lang = parse_code(&lang)?;
    DetailStore::<D, _>::new(&state.db)
        .get_for_parent(id, detail_id)
        .await?;
    TranslationStore::<D::Translation, _>::new(&state.db)
        .delete(detail_id, &lang)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_bundle<D, C>(
    store: &DetailStore<'_, D, C>,
    parent_id: i32,
    detail_id: i32,
) -> Result<DetailBundle, AppError>
where
    D: DetailTable,
    C: sea_orm::ConnectionTrait + sea_orm::TransactionTrait,
{
    store
        .load(&[parent_id])
        .await?
        .remove(&parent_id)
        .and_then(|lines| lines.into_iter().find(|line| line.id == detail_id))
        .ok_or_else(|| StoreError::not_found(D::LABEL, detail_id).into())
}
