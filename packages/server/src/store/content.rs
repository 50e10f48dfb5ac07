use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use super::translation::ensure_parent;
use super::{
    ContentTable, DetailSet, StoreError, StoreResult, TranslationStore, classify_write,
};
use crate::entity::user;

/// Canonical rows of one content kind.
pub struct ContentStore<'c, K, C> {
    conn: &'c C,
    _kind: PhantomData<K>,
}

impl<'c, K, C> ContentStore<'c, K, C>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            _kind: PhantomData,
        }
    }

    #[instrument(skip(self, fields), fields(kind = K::KIND, owner_id))]
    pub async fn create(&self, owner_id: i32, fields: K::Fields) -> StoreResult<K::Model> {
        K::validate(&fields)?;
        ensure_parent::<user::Entity, C>(self.conn, owner_id).await?;

        let row = K::insert_row(self.conn, K::new_row(owner_id, fields, Utc::now()))
            .await
            .map_err(|e| classify_write(e, || StoreError::not_found("user", owner_id)))?;
        info!(id = K::id(&row), "Created {}", K::LABEL);
        Ok(row)
    }

    pub async fn get(&self, id: i32) -> StoreResult<K::Model> {
        K::find()
            .filter(K::id_column().eq(id))
            .one(self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found(K::LABEL, id))
    }

    /// Rows ordered by `sort_order`, ties broken by `id`.
    pub async fn list(&self, owner_id: Option<i32>) -> StoreResult<Vec<K::Model>> {
        let mut select = K::find();
        if let Some(owner_id) = owner_id {
            select = select.filter(K::owner_column().eq(owner_id));
        }
        Ok(select
            .order_by_asc(K::sort_order_column())
            .order_by_asc(K::id_column())
            .all(self.conn)
            .await?)
    }

    /// Apply a partial update. The empty patch returns the row unchanged.
    #[instrument(skip(self, patch), fields(kind = K::KIND, id))]
    pub async fn update(&self, id: i32, patch: K::Patch) -> StoreResult<K::Model> {
        if patch == K::Patch::default() {
            return self.get(id).await;
        }

        let txn = self.conn.begin().await?;
        let current = ContentStore::<K, _>::new(&txn).get(id).await?;
        K::validate_patch(&current, &patch)?;

        let row = K::update_row(&txn, K::apply_patch(current, patch, Utc::now()))
            .await
            .map_err(|e| classify_write(e, || StoreError::not_found(K::LABEL, id)))?;
        txn.commit().await?;
        Ok(row)
    }

    /// Delete a row together with its translations and detail lines.
    #[instrument(skip(self), fields(kind = K::KIND, id))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let txn = self.conn.begin().await?;
        ContentStore::<K, _>::new(&txn).get(id).await?;
        purge::<K, _>(&txn, &[id]).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Delete everything of this kind owned by `owner_id`.
    pub async fn delete_for_owner(&self, owner_id: i32) -> StoreResult<u64> {
        let txn = self.conn.begin().await?;
        let ids: Vec<i32> = K::find()
            .filter(K::owner_column().eq(owner_id))
            .all(&txn)
            .await?
            .iter()
            .map(K::id)
            .collect();
        let removed = purge::<K, _>(&txn, &ids).await?;
        txn.commit().await?;
        Ok(removed)
    }
}

/// Remove base rows and every dependent row. Children go first so that
/// restrictive foreign keys never block the parent delete.
async fn purge<K, C>(conn: &C, ids: &[i32]) -> StoreResult<u64>
where
    K: ContentTable,
    C: ConnectionTrait + TransactionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }
    K::Details::delete_for_parents(conn, ids).await?;
    TranslationStore::<K::Translation, C>::new(conn)
        .delete_for_parents(ids)
        .await?;
    let result = K::delete_many()
        .filter(K::id_column().is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
