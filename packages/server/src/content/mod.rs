//! Content kinds and the projection of their rows into reader-facing views.
//!
//! Each submodule plugs one base table, its translation table and, for some
//! kinds, its detail tables into the generic stores. This module composes
//! them: base rows, batched translations, batched details, resolution, and
//! finally projection.

/// `Keyed` for tables whose integer primary key column is `id`.
macro_rules! keyed {
    ($($module:ident => $label:literal),+ $(,)?) => {
        $(
            impl $crate::store::Keyed for $crate::entity::$module::Entity {
                const LABEL: &'static str = $label;

                fn id_column() -> $crate::entity::$module::Column {
                    $crate::entity::$module::Column::Id
                }

                fn id(row: &$crate::entity::$module::Model) -> i32 {
                    row.id
                }
            }
        )+
    };
}

/// `DetailTable` plus its `TranslationTable` for one pair of detail tables.
macro_rules! detail_tables {
    (
        $detail:ident ($parent_field:ident: $parent_col:ident) under $parent:ident,
        $translation:ident ($detail_field:ident: $detail_col:ident)
    ) => {
        impl $crate::store::DetailTable for $crate::entity::$detail::Entity {
            type Parent = $crate::entity::$parent::Entity;
            type Translation = $crate::entity::$translation::Entity;

            fn parent_column() -> $crate::entity::$detail::Column {
                $crate::entity::$detail::Column::$parent_col
            }

            fn position_column() -> $crate::entity::$detail::Column {
                $crate::entity::$detail::Column::Position
            }

            fn parent_id(row: &$crate::entity::$detail::Model) -> i32 {
                row.$parent_field
            }

            fn position(row: &$crate::entity::$detail::Model) -> i32 {
                row.position
            }

            fn created_at(row: &$crate::entity::$detail::Model) -> chrono::DateTime<chrono::Utc> {
                row.created_at
            }

            fn new_row(
                parent_id: i32,
                position: i32,
                now: chrono::DateTime<chrono::Utc>,
            ) -> $crate::entity::$detail::ActiveModel {
                $crate::entity::$detail::ActiveModel {
                    $parent_field: sea_orm::Set(parent_id),
                    position: sea_orm::Set(position),
                    created_at: sea_orm::Set(now),
                    ..Default::default()
                }
            }

            fn set_position(
                current: $crate::entity::$detail::Model,
                position: i32,
            ) -> $crate::entity::$detail::ActiveModel {
                let mut active: $crate::entity::$detail::ActiveModel = current.into();
                active.position = sea_orm::Set(position);
                active
            }
        }

        impl $crate::store::TranslationTable for $crate::entity::$translation::Entity {
            type Parent = $crate::entity::$detail::Entity;
            type Text = $crate::store::DetailText;

            fn parent_column() -> $crate::entity::$translation::Column {
                $crate::entity::$translation::Column::$detail_col
            }

            fn language_column() -> $crate::entity::$translation::Column {
                $crate::entity::$translation::Column::LanguageCode
            }

            fn parent_id(row: &$crate::entity::$translation::Model) -> i32 {
                row.$detail_field
            }

            fn language_code(row: &$crate::entity::$translation::Model) -> &str {
                &row.language_code
            }

            fn created_at(
                row: &$crate::entity::$translation::Model,
            ) -> chrono::DateTime<chrono::Utc> {
                row.created_at
            }

            fn text(row: &$crate::entity::$translation::Model) -> $crate::store::DetailText {
                $crate::store::DetailText {
                    content: row.content.clone(),
                }
            }

            fn validate(text: &$crate::store::DetailText) -> $crate::store::StoreResult<()> {
                text.validate()
            }

            fn new_row(
                parent_id: i32,
                language: &common::LanguageCode,
                text: $crate::store::DetailText,
                now: chrono::DateTime<chrono::Utc>,
            ) -> $crate::entity::$translation::ActiveModel {
                $crate::entity::$translation::ActiveModel {
                    $detail_field: sea_orm::Set(parent_id),
                    language_code: sea_orm::Set(language.as_str().to_string()),
                    content: sea_orm::Set($crate::store::validate::clean(text.content)),
                    created_at: sea_orm::Set(now),
                    ..Default::default()
                }
            }

            fn replace(
                current: $crate::entity::$translation::Model,
                text: $crate::store::DetailText,
                now: chrono::DateTime<chrono::Utc>,
            ) -> $crate::entity::$translation::ActiveModel {
                let mut active: $crate::entity::$translation::ActiveModel = current.into();
                active.content = sea_orm::Set($crate::store::validate::clean(text.content));
                active.created_at = sea_orm::Set(now);
                active
            }
        }
    };
}

pub mod award;
pub mod blog_post;
pub mod education;
pub mod idea;
pub mod personal_info;
pub mod project;
pub mod publication;
pub mod recent_update;
pub mod research_project;
pub mod resume;
mod view;
pub mod work_experience;

pub use resume::{Resume, resume};
pub use view::{LocalizedView, OwnerSummary, ViewOptions, get_view, list_views, project_localized};

use common::LanguageCode;
use sea_orm::{ConnectionTrait, TransactionSession, TransactionTrait};
use tracing::instrument;

use crate::entity;
use crate::store::{ContentStore, ContentTable, DetailSet, StoreResult, TranslationStore};

keyed! {
    personal_info => "personal info",
    personal_info_translation => "personal info translation",
    education => "education",
    education_translation => "education translation",
    education_detail => "education detail",
    education_detail_translation => "education detail translation",
    work_experience => "work experience",
    work_experience_translation => "work experience translation",
    work_experience_detail => "work experience detail",
    work_experience_detail_translation => "work experience detail translation",
    project => "project",
    project_translation => "project translation",
    project_detail => "project detail",
    project_detail_translation => "project detail translation",
    blog_post => "blog post",
    blog_post_translation => "blog post translation",
    idea => "idea",
    idea_translation => "idea translation",
    research_project => "research project",
    research_project_translation => "research project translation",
    research_project_detail => "research project detail",
    research_project_detail_translation => "research project detail translation",
    publication => "publication",
    publication_translation => "publication translation",
    award => "award",
    award_translation => "award translation",
    recent_update => "recent update",
    recent_update_translation => "recent update translation",
}

/// Create a row and its initial translations in one transaction.
#[instrument(skip(conn, fields, translations), fields(kind = K::KIND, owner_id))]
pub async fn create_with_translations<K, C>(
    conn: &C,
    owner_id: i32,
    fields: K::Fields,
    translations: Vec<(LanguageCode, <K::Translation as crate::store::TranslationTable>::Text)>,
) -> StoreResult<K::Model>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let row = ContentStore::<K, _>::new(&txn).create(owner_id, fields).await?;

    let store = TranslationStore::<K::Translation, _>::new(&txn);
    for (language, text) in translations {
        store.upsert(K::id(&row), &language, text).await?;
    }

    txn.commit().await?;
    Ok(row)
}

/// Delete every row of every kind owned by `owner_id`.
pub async fn purge_owner<C>(conn: &C, owner_id: i32) -> StoreResult<u64>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut removed = 0;
    removed += ContentStore::<entity::personal_info::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::education::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::work_experience::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::project::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::blog_post::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::idea::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::research_project::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::publication::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::award::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    removed += ContentStore::<entity::recent_update::Entity, C>::new(conn)
        .delete_for_owner(owner_id)
        .await?;
    Ok(removed)
}

/// Number of translations, detail translations included, written in `language`.
pub async fn count_language_references<C>(conn: &C, language: &str) -> StoreResult<u64>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut total = 0;
    total += references::<entity::personal_info::Entity, C>(conn, language).await?;
    total += references::<entity::education::Entity, C>(conn, language).await?;
    total += references::<entity::work_experience::Entity, C>(conn, language).await?;
    total += references::<entity::project::Entity, C>(conn, language).await?;
    total += references::<entity::blog_post::Entity, C>(conn, language).await?;
    total += references::<entity::idea::Entity, C>(conn, language).await?;
    total += references::<entity::research_project::Entity, C>(conn, language).await?;
    total += references::<entity::publication::Entity, C>(conn, language).await?;
    total += references::<entity::award::Entity, C>(conn, language).await?;
    total += references::<entity::recent_update::Entity, C>(conn, language).await?;
    Ok(total)
}

async fn references<K, C>(conn: &C, language: &str) -> StoreResult<u64>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    let own = TranslationStore::<K::Translation, C>::new(conn)
        .count_for_language(language)
        .await?;
    let lines = K::Details::count_for_language(conn, language).await?;
    Ok(own + lines)
}
