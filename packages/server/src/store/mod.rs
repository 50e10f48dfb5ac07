//! Data access for every content kind.
//!
//! Each store borrows a connection or an open transaction for its lifetime,
//! so callers decide the transactional scope. Stores never hold global state.
//!
//! The per-kind tables plug into the generic stores through three traits:
//! [`ContentTable`] for base rows, [`TranslationTable`] for per-language
//! overlays, and [`DetailTable`] for ordered child lines.

pub mod content;
pub mod detail;
pub mod language;
pub mod translation;
pub mod user;
pub mod validate;

use std::fmt;

use chrono::{DateTime, Utc};
use common::LanguageCode;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    SqlErr,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use content::ContentStore;
pub use detail::{DetailBundle, DetailSet, DetailStore, DetailText, Details, NoDetails};
pub use language::LanguageRegistry;
pub use translation::{TranslationRecord, TranslationStore};
pub use user::UserStore;

/// Errors surfaced by the store layer.
///
/// Raw constraint violations never leave a store; they are classified into
/// [`StoreError::Conflict`] or [`StoreError::NotFound`] first.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Classify a failed write.
///
/// Unique violations become `Conflict`, foreign key violations become the
/// `NotFound` produced by `missing`. Anything else stays a database error.
pub(crate) fn classify_write(err: DbErr, missing: impl FnOnce() -> StoreError) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => missing(),
        _ => StoreError::Database(err),
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Write access shared by every entity.
///
/// Implemented for all SeaORM entities whose active model can be inserted
/// and updated, so generic code only needs `E: Table`. The futures are
/// `Send` so generic handlers can be served by axum.
pub trait Table: EntityTrait {
    fn insert_row<C: ConnectionTrait>(
        conn: &C,
        row: Self::ActiveModel,
    ) -> impl Future<Output = Result<Self::Model, DbErr>> + Send;

    fn update_row<C: ConnectionTrait>(
        conn: &C,
        row: Self::ActiveModel,
    ) -> impl Future<Output = Result<Self::Model, DbErr>> + Send;
}

impl<E> Table for E
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    async fn insert_row<C: ConnectionTrait>(
        conn: &C,
        row: E::ActiveModel,
    ) -> Result<E::Model, DbErr> {
        row.insert(conn).await
    }

    async fn update_row<C: ConnectionTrait>(
        conn: &C,
        row: E::ActiveModel,
    ) -> Result<E::Model, DbErr> {
        row.update(conn).await
    }
}

/// A table keyed by an integer `id`.
pub trait Keyed: Table {
    /// Human-readable name used in error messages, e.g. `education`.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn id(row: &Self::Model) -> i32;
}

/// A base table: one canonical row per content item, owned by a user.
pub trait ContentTable: Keyed {
    /// Route segment, e.g. `work-experience`.
    const KIND: &'static str;

    type Translation: TranslationTable<Parent = Self>;
    type Details: DetailSet;

    /// Canonical fields accepted on create.
    type Fields: DeserializeOwned + Send + 'static;
    /// Canonical fields accepted on update; `Default` is the empty patch.
    type Patch: DeserializeOwned + Default + PartialEq + Send + 'static;
    /// Projected record returned to readers.
    type View: Serialize + Send + 'static;

    fn owner_column() -> Self::Column;
    fn sort_order_column() -> Self::Column;
    fn owner_id(row: &Self::Model) -> i32;
    fn sort_order(row: &Self::Model) -> i32;

    fn validate(fields: &Self::Fields) -> StoreResult<()>;
    fn new_row(owner_id: i32, fields: Self::Fields, now: DateTime<Utc>) -> Self::ActiveModel;

    /// Check a patch against the row it will be applied to.
    fn validate_patch(current: &Self::Model, patch: &Self::Patch) -> StoreResult<()>;
    /// Apply a non-empty patch. Must refresh `updated_at` to `now`.
    fn apply_patch(current: Self::Model, patch: Self::Patch, now: DateTime<Utc>)
    -> Self::ActiveModel;

    /// Compose the reader-facing record. Pure and total.
    fn project(
        row: &Self::Model,
        text: &<Self::Translation as TranslationTable>::Text,
        details: Vec<String>,
    ) -> Self::View;
}

/// A per-language overlay of some parent table.
pub trait TranslationTable: Keyed + EntityTrait<Model: Sync> {
    type Parent: Keyed;
    /// The language-dependent field set. `Default` is the empty rendering
    /// used when no translation exists at all.
    type Text: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn parent_column() -> Self::Column;
    fn language_column() -> Self::Column;
    fn parent_id(row: &Self::Model) -> i32;
    fn language_code(row: &Self::Model) -> &str;
    fn created_at(row: &Self::Model) -> DateTime<Utc>;
    fn text(row: &Self::Model) -> Self::Text;

    fn validate(text: &Self::Text) -> StoreResult<()>;
    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: Self::Text,
        now: DateTime<Utc>,
    ) -> Self::ActiveModel;
    /// Overwrite every translatable field of `current` and restamp it.
    fn replace(current: Self::Model, text: Self::Text, now: DateTime<Utc>) -> Self::ActiveModel;
}

/// Ordered child lines of a base row, each translated independently.
pub trait DetailTable: Keyed {
    type Parent: Keyed;
    type Translation: TranslationTable<Parent = Self, Text = DetailText>;

    fn parent_column() -> Self::Column;
    fn position_column() -> Self::Column;
    fn parent_id(row: &Self::Model) -> i32;
    fn position(row: &Self::Model) -> i32;
    fn created_at(row: &Self::Model) -> DateTime<Utc>;

    fn new_row(parent_id: i32, position: i32, now: DateTime<Utc>) -> Self::ActiveModel;
    fn set_position(current: Self::Model, position: i32) -> Self::ActiveModel;
}
