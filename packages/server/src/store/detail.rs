use std::collections::HashMap;
use std::marker::PhantomData;

use chrono::Utc;
use common::{LanguageCode, LanguagePreference, resolve_for};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::translation::ensure_parent;
use super::validate::{self, MAX_SUMMARY_LEN};
use super::{DetailTable, Keyed, StoreError, StoreResult, TranslationRecord, TranslationStore};

/// Translatable text of one detail line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DetailText {
    pub content: String,
}

impl DetailText {
    pub fn validate(&self) -> StoreResult<()> {
        validate::required_text("content", &self.content, MAX_SUMMARY_LEN * 2)
    }
}

/// One detail line with every translation it has.
#[derive(Clone, Debug, Serialize)]
pub struct DetailBundle {
    pub id: i32,
    pub position: i32,
    pub translations: Vec<TranslationRecord<DetailText>>,
}

impl DetailBundle {
    /// Resolve this line on its own; a line without any translation renders empty.
    pub fn resolve(&self, preference: &LanguagePreference) -> String {
        resolve_for(&self.translations, preference)
            .translation
            .map(|t| t.text.content.clone())
            .unwrap_or_default()
    }
}

/// Ordered child lines of one content kind.
pub struct DetailStore<'c, D, C> {
    conn: &'c C,
    _table: PhantomData<D>,
}

impl<'c, D, C> DetailStore<'c, D, C>
where
    D: DetailTable,
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            _table: PhantomData,
        }
    }

    /// Add a line under `parent_id`, appended after the last one unless a
    /// position is given, together with its initial translations.
    #[instrument(skip(self, translations), fields(parent = D::Parent::LABEL, parent_id))]
    pub async fn create(
        &self,
        parent_id: i32,
        position: Option<i32>,
        translations: Vec<(LanguageCode, DetailText)>,
    ) -> StoreResult<D::Model> {
        if let Some(position) = position {
            validate::position(position)?;
        }
        for (_, text) in &translations {
            text.validate()?;
        }

        let txn = self.conn.begin().await?;
        ensure_parent::<D::Parent, _>(&txn, parent_id).await?;

        let position = match position {
            Some(p) => p,
            None => DetailStore::<D, _>::new(&txn).next_position(parent_id).await?,
        };
        let detail = D::insert_row(&txn, D::new_row(parent_id, position, Utc::now())).await?;

        let lines = TranslationStore::<D::Translation, _>::new(&txn);
        for (language, text) in translations {
            lines.upsert(D::id(&detail), &language, text).await?;
        }

        txn.commit().await?;
        Ok(detail)
    }

    /// Lines of one parent ordered by position, then id.
    pub async fn list_for_parent(&self, parent_id: i32) -> StoreResult<Vec<D::Model>> {
        Ok(D::find()
            .filter(D::parent_column().eq(parent_id))
            .order_by_asc(D::position_column())
            .order_by_asc(D::id_column())
            .all(self.conn)
            .await?)
    }

    /// A line, provided it belongs to `parent_id`.
    pub async fn get_for_parent(&self, parent_id: i32, detail_id: i32) -> StoreResult<D::Model> {
        D::find()
            .filter(D::id_column().eq(detail_id))
            .filter(D::parent_column().eq(parent_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found(D::LABEL, detail_id))
    }

    #[instrument(skip(self), fields(parent_id, detail_id))]
    pub async fn set_position(
        &self,
        parent_id: i32,
        detail_id: i32,
        position: i32,
    ) -> StoreResult<D::Model> {
        validate::position(position)?;
        let current = self.get_for_parent(parent_id, detail_id).await?;
        if D::position(&current) == position {
            return Ok(current);
        }
        Ok(D::update_row(self.conn, D::set_position(current, position)).await?)
    }

    #[instrument(skip(self), fields(parent_id, detail_id))]
    pub async fn delete(&self, parent_id: i32, detail_id: i32) -> StoreResult<()> {
        let txn = self.conn.begin().await?;
        DetailStore::<D, _>::new(&txn)
            .get_for_parent(parent_id, detail_id)
            .await?;

        TranslationStore::<D::Translation, _>::new(&txn)
            .delete_for_parents(&[detail_id])
            .await?;
        D::delete_many()
            .filter(D::id_column().eq(detail_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Batch-load the lines of many parents with all their translations.
    ///
    /// Two queries regardless of how many parents are asked for.
    pub async fn load(&self, parent_ids: &[i32]) -> StoreResult<HashMap<i32, Vec<DetailBundle>>> {
        let mut grouped: HashMap<i32, Vec<DetailBundle>> = HashMap::new();
        if parent_ids.is_empty() {
            return Ok(grouped);
        }

        let details = D::find()
            .filter(D::parent_column().is_in(parent_ids.iter().copied()))
            .order_by_asc(D::position_column())
            .order_by_asc(D::id_column())
            .all(self.conn)
            .await?;

        let detail_ids: Vec<i32> = details.iter().map(D::id).collect();
        let mut lines = TranslationStore::<D::Translation, _>::new(self.conn)
            .list_for_entities(&detail_ids)
            .await?;

        for detail in &details {
            let id = D::id(detail);
            grouped
                .entry(D::parent_id(detail))
                .or_default()
                .push(DetailBundle {
                    id,
                    position: D::position(detail),
                    translations: lines.remove(&id).unwrap_or_default(),
                });
        }
        Ok(grouped)
    }

    /// Remove every line (and its translations) under the given parents.
    pub async fn delete_for_parents(&self, parent_ids: &[i32]) -> StoreResult<u64> {
        if parent_ids.is_empty() {
            return Ok(0);
        }
        let detail_ids: Vec<i32> = D::find()
            .filter(D::parent_column().is_in(parent_ids.iter().copied()))
            .all(self.conn)
            .await?
            .iter()
            .map(D::id)
            .collect();

        TranslationStore::<D::Translation, _>::new(self.conn)
            .delete_for_parents(&detail_ids)
            .await?;
        let result = D::delete_many()
            .filter(D::parent_column().is_in(parent_ids.iter().copied()))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn next_position(&self, parent_id: i32) -> StoreResult<i32> {
        let last = D::find()
            .filter(D::parent_column().eq(parent_id))
            .order_by_desc(D::position_column())
            .one(self.conn)
            .await?;
        Ok(last.map(|row| D::position(&row) + 1).unwrap_or(0))
    }
}

/// Whether a content kind carries detail lines, and which table holds them.
pub trait DetailSet {
    const ENABLED: bool;

    fn load<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        parent_ids: &[i32],
    ) -> impl Future<Output = StoreResult<HashMap<i32, Vec<DetailBundle>>>> + Send;

    fn delete_for_parents<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        parent_ids: &[i32],
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    fn count_for_language<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        language: &str,
    ) -> impl Future<Output = StoreResult<u64>> + Send;
}

/// Kinds without detail lines.
pub struct NoDetails;

impl DetailSet for NoDetails {
    const ENABLED: bool = false;

    async fn load<C: ConnectionTrait + TransactionTrait>(
        _conn: &C,
        _parent_ids: &[i32],
    ) -> StoreResult<HashMap<i32, Vec<DetailBundle>>> {
        Ok(HashMap::new())
    }

    async fn delete_for_parents<C: ConnectionTrait + TransactionTrait>(
        _conn: &C,
        _parent_ids: &[i32],
    ) -> StoreResult<u64> {
        Ok(0)
    }

    async fn count_for_language<C: ConnectionTrait + TransactionTrait>(
        _conn: &C,
        _language: &str,
    ) -> StoreResult<u64> {
        Ok(0)
    }
}

/// Kinds whose lines live in `D`.
pub struct Details<D>(PhantomData<D>);

impl<D: DetailTable> DetailSet for Details<D> {
    const ENABLED: bool = true;

    async fn load<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        parent_ids: &[i32],
    ) -> StoreResult<HashMap<i32, Vec<DetailBundle>>> {
        DetailStore::<D, C>::new(conn).load(parent_ids).await
    }

    async fn delete_for_parents<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        parent_ids: &[i32],
    ) -> StoreResult<u64> {
        DetailStore::<D, C>::new(conn)
            .delete_for_parents(parent_ids)
            .await
    }

    async fn count_for_language<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        language: &str,
    ) -> StoreResult<u64> {
        TranslationStore::<D::Translation, C>::new(conn)
            .count_for_language(language)
            .await
    }
}

