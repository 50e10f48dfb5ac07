use std::collections::HashMap;

use common::{LanguagePreference, ResolvedFrom, resolve_for};
use sea_orm::*;
use serde::Serialize;

use crate::entity::user;
use crate::store::{
    ContentStore, ContentTable, DetailSet, StoreError, StoreResult, TranslationRecord,
    TranslationStore, TranslationTable,
};

/// A projected row together with the language it ended up rendered in.
#[derive(Debug, Serialize)]
pub struct LocalizedView<V> {
    #[serde(flatten)]
    pub view: V,
    /// Language of the translation used, `None` when the row has none.
    pub language: Option<String>,
    pub resolved_from: ResolvedFrom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSummary>,
}

#[derive(Clone, Debug, Serialize, utoipa::ToSchema)]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
}

impl From<&user::Model> for OwnerSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
        }
    }
}

/// Which edges to load eagerly alongside the base rows.
#[derive(Clone, Copy, Debug)]
pub struct ViewOptions {
    pub include_owner: bool,
    pub include_details: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            include_owner: false,
            include_details: true,
        }
    }
}

/// List rows of one kind, optionally for one owner, rendered for `preference`.
pub async fn list_views<K, C>(
    conn: &C,
    owner_id: Option<i32>,
    preference: &LanguagePreference,
    options: ViewOptions,
) -> StoreResult<Vec<LocalizedView<K::View>>>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    let rows = ContentStore::<K, C>::new(conn).list(owner_id).await?;
    assemble::<K, C>(conn, rows, preference, options).await
}

/// One row rendered for `preference`. Missing translations never fail this;
/// only a missing base row does.
pub async fn get_view<K, C>(
    conn: &C,
    id: i32,
    preference: &LanguagePreference,
    options: ViewOptions,
) -> StoreResult<LocalizedView<K::View>>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    let row = ContentStore::<K, C>::new(conn).get(id).await?;
    assemble::<K, C>(conn, vec![row], preference, options)
        .await?
        .pop()
        .ok_or_else(|| StoreError::not_found(K::LABEL, id))
}

/// Compose one row from its translations and already-resolved detail lines.
pub fn project_localized<K: ContentTable>(
    row: &K::Model,
    candidates: &[TranslationRecord<<K::Translation as TranslationTable>::Text>],
    details: Vec<String>,
    preference: &LanguagePreference,
    owner: Option<OwnerSummary>,
) -> LocalizedView<K::View> {
    let resolution = resolve_for(candidates, preference);
    let empty = <K::Translation as TranslationTable>::Text::default();
    let text = resolution.translation.map(|t| &t.text).unwrap_or(&empty);

    LocalizedView {
        view: K::project(row, text, details),
        language: resolution.language().map(str::to_string),
        resolved_from: resolution.source,
        owner,
    }
}

/// Batch-load every edge of `rows`, then resolve and project each row.
///
/// Issues at most four queries whatever the number of rows: translations,
/// detail lines, detail translations and owners.
async fn assemble<K, C>(
    conn: &C,
    rows: Vec<K::Model>,
    preference: &LanguagePreference,
    options: ViewOptions,
) -> StoreResult<Vec<LocalizedView<K::View>>>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = rows.iter().map(K::id).collect();

    let mut translations = TranslationStore::<K::Translation, C>::new(conn)
        .list_for_entities(&ids)
        .await?;

    let mut details = if options.include_details {
        K::Details::load(conn, &ids).await?
    } else {
        HashMap::new()
    };

    let owners = if options.include_owner {
        load_owners(conn, rows.iter().map(K::owner_id).collect()).await?
    } else {
        HashMap::new()
    };

    Ok(rows
        .iter()
        .map(|row| {
            let id = K::id(row);
            let candidates = translations.remove(&id).unwrap_or_default();
            let lines = details
                .remove(&id)
                .unwrap_or_default()
                .iter()
                .map(|line| line.resolve(preference))
                .collect();
            let owner = owners.get(&K::owner_id(row)).cloned();
            project_localized::<K>(row, &candidates, lines, preference, owner)
        })
        .collect())
}

async fn load_owners<C: ConnectionTrait>(
    conn: &C,
    mut ids: Vec<i32>,
) -> StoreResult<HashMap<i32, OwnerSummary>> {
    ids.sort_unstable();
    ids.dedup();
    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(conn)
        .await?;
    Ok(users
        .iter()
        .map(|user| (user.id, OwnerSummary::from(user)))
        .collect())
}
