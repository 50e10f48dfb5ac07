use common::LanguageCode;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::{info, instrument};

use super::validate::{MAX_LABEL_LEN, required_text};
use super::{StoreError, StoreResult, classify_write};
use crate::content;
use crate::entity::language;

/// The set of languages content may be translated into.
pub struct LanguageRegistry<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait + TransactionTrait> LanguageRegistry<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Active languages ordered by code.
    pub async fn list_active(&self) -> StoreResult<Vec<language::Model>> {
        Ok(language::Entity::find()
            .filter(language::Column::IsActive.eq(true))
            .order_by_asc(language::Column::Code)
            .all(self.conn)
            .await?)
    }

    pub async fn active_codes(&self) -> StoreResult<Vec<LanguageCode>> {
        let rows = self.list_active().await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| LanguageCode::parse(&row.code).ok())
            .collect())
    }

    /// Whether `code` names an active language.
    ///
    /// Unknown, inactive and malformed codes are all simply `false`.
    pub async fn is_valid(&self, code: &str) -> StoreResult<bool> {
        let Ok(code) = LanguageCode::parse(code) else {
            return Ok(false);
        };
        let found = language::Entity::find_by_id(code.into_inner())
            .filter(language::Column::IsActive.eq(true))
            .one(self.conn)
            .await?;
        Ok(found.is_some())
    }

    pub async fn get(&self, code: &LanguageCode) -> StoreResult<language::Model> {
        language::Entity::find_by_id(code.as_str())
            .one(self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("language", code))
    }

    /// Register a language. Returns `false` when it already existed.
    #[instrument(skip(self, name, native_name), fields(code = %code))]
    pub async fn register(
        &self,
        code: &LanguageCode,
        name: &str,
        native_name: &str,
    ) -> StoreResult<bool> {
        required_text("name", name, MAX_LABEL_LEN)?;
        required_text("native_name", native_name, MAX_LABEL_LEN)?;

        let model = language::ActiveModel {
            code: Set(code.as_str().to_string()),
            name: Set(name.trim().to_string()),
            native_name: Set(native_name.trim().to_string()),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        let result = language::Entity::insert(model)
            .on_conflict(
                OnConflict::column(language::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await;

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a language that no translation refers to.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn remove(&self, code: &LanguageCode) -> StoreResult<()> {
        let txn = self.conn.begin().await?;

        LanguageRegistry::new(&txn).get(code).await?;

        let references = content::count_language_references(&txn, code.as_str()).await?;
        if references > 0 {
            return Err(StoreError::Conflict(format!(
                "Language '{code}' is used by {references} translation(s)"
            )));
        }

        language::Entity::delete_by_id(code.as_str())
            .exec(&txn)
            .await
            .map_err(|e| {
                classify_write(e, || {
                    StoreError::Conflict(format!("Language '{code}' is still referenced"))
                })
            })?;
        txn.commit().await?;

        info!("Removed language");
        Ok(())
    }
}
