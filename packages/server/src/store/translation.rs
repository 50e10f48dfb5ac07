use std::collections::HashMap;
use std::marker::PhantomData;

use chrono::Utc;
use common::format::format_timestamp;
use common::{LanguageCode, Localized};
use sea_orm::*;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    Keyed, LanguageRegistry, StoreError, StoreResult, TranslationTable, classify_write,
    is_unique_violation,
};

/// A stored translation, detached from its entity type.
#[derive(Clone, Debug, Serialize)]
pub struct TranslationRecord<T> {
    pub id: i32,
    pub language_code: String,
    #[serde(flatten)]
    pub text: T,
    pub created_at: String,
}

impl<T> TranslationRecord<T> {
    pub fn from_row<E>(row: &E::Model) -> Self
    where
        E: TranslationTable<Text = T>,
    {
        Self {
            id: E::id(row),
            language_code: E::language_code(row).to_string(),
            text: E::text(row),
            created_at: format_timestamp(E::created_at(row)),
        }
    }
}

impl<T> Localized for TranslationRecord<T> {
    fn language_code(&self) -> &str {
        &self.language_code
    }
}

/// Per-language overlays of one parent table.
pub struct TranslationStore<'c, T, C> {
    conn: &'c C,
    _table: PhantomData<T>,
}

impl<'c, T, C> TranslationStore<'c, T, C>
where
    T: TranslationTable,
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            _table: PhantomData,
        }
    }

    /// Insert or wholesale-replace the translation of `parent_id` in `language`.
    ///
    /// At most one row ever exists per (parent, language). A concurrent
    /// insert that wins the race is replaced rather than reported.
    #[instrument(
        skip(self, text),
        fields(parent = T::Parent::LABEL, parent_id, language = %language)
    )]
    pub async fn upsert(
        &self,
        parent_id: i32,
        language: &LanguageCode,
        text: T::Text,
    ) -> StoreResult<T::Model> {
        T::validate(&text)?;

        if !LanguageRegistry::new(self.conn)
            .is_valid(language.as_str())
            .await?
        {
            return Err(StoreError::not_found("language", language));
        }
        ensure_parent::<T::Parent, C>(self.conn, parent_id).await?;

        let now = Utc::now();
        if let Some(existing) = self.find(parent_id, language.as_str()).await? {
            let row = T::update_row(self.conn, T::replace(existing, text, now)).await?;
            return Ok(row);
        }

        // Inserting inside a savepoint keeps an enclosing transaction usable
        // when the insert loses a race on the composite key.
        let attempt = self.conn.begin().await?;
        match T::insert_row(&attempt, T::new_row(parent_id, language, text.clone(), now)).await {
            Ok(row) => {
                attempt.commit().await?;
                Ok(row)
            }
            Err(e) if is_unique_violation(&e) => {
                attempt.rollback().await?;
                debug!("Translation inserted concurrently, replacing it");
                let existing = self
                    .find(parent_id, language.as_str())
                    .await?
                    .ok_or_else(|| StoreError::not_found("translation", language))?;
                Ok(T::update_row(self.conn, T::replace(existing, text, now)).await?)
            }
            Err(e) => Err(classify_write(e, || {
                StoreError::not_found(T::Parent::LABEL, parent_id)
            })),
        }
    }

    pub async fn get(&self, parent_id: i32, language: &LanguageCode) -> StoreResult<T::Model> {
        self.find(parent_id, language.as_str())
            .await?
            .ok_or_else(|| {
                StoreError::not_found("translation", format!("{parent_id}/{language}"))
            })
    }

    /// All translations of one parent, ordered by language code.
    pub async fn list_for_entity(&self, parent_id: i32) -> StoreResult<Vec<T::Model>> {
        Ok(T::find()
            .filter(T::parent_column().eq(parent_id))
            .order_by_asc(T::language_column())
            .all(self.conn)
            .await?)
    }

    /// Batch-load translations for many parents in one query, grouped by parent.
    pub async fn list_for_entities(
        &self,
        parent_ids: &[i32],
    ) -> StoreResult<HashMap<i32, Vec<TranslationRecord<T::Text>>>> {
        let mut grouped: HashMap<i32, Vec<TranslationRecord<T::Text>>> = HashMap::new();
        if parent_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = T::find()
            .filter(T::parent_column().is_in(parent_ids.iter().copied()))
            .order_by_asc(T::parent_column())
            .order_by_asc(T::language_column())
            .all(self.conn)
            .await?;

        for row in &rows {
            grouped
                .entry(T::parent_id(row))
                .or_default()
                .push(TranslationRecord::from_row::<T>(row));
        }
        Ok(grouped)
    }

    #[instrument(skip(self), fields(parent = T::Parent::LABEL, parent_id, language = %language))]
    pub async fn delete(&self, parent_id: i32, language: &LanguageCode) -> StoreResult<()> {
        let result = T::delete_many()
            .filter(T::parent_column().eq(parent_id))
            .filter(T::language_column().eq(language.as_str()))
            .exec(self.conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(
                "translation",
                format!("{parent_id}/{language}"),
            ));
        }
        Ok(())
    }

    pub async fn delete_for_parents(&self, parent_ids: &[i32]) -> StoreResult<u64> {
        if parent_ids.is_empty() {
            return Ok(0);
        }
        let result = T::delete_many()
            .filter(T::parent_column().is_in(parent_ids.iter().copied()))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn count_for_language(&self, language: &str) -> StoreResult<u64> {
        Ok(T::find()
            .filter(T::language_column().eq(language))
            .count(self.conn)
            .await?)
    }

    /// Rows stored for one (parent, language) key; never more than one.
    pub async fn count_for(&self, parent_id: i32, language: &str) -> StoreResult<u64> {
        Ok(T::find()
            .filter(T::parent_column().eq(parent_id))
            .filter(T::language_column().eq(language))
            .count(self.conn)
            .await?)
    }

    async fn find(&self, parent_id: i32, language: &str) -> StoreResult<Option<T::Model>> {
        Ok(T::find()
            .filter(T::parent_column().eq(parent_id))
            .filter(T::language_column().eq(language))
            .one(self.conn)
            .await?)
    }
}

/// Fail with `NotFound` unless a row with `id` exists in `P`.
pub(crate) async fn ensure_parent<P: Keyed, C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> StoreResult<P::Model> {
    P::find()
        .filter(P::id_column().eq(id))
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::not_found(P::LABEL, id))
}
