use chrono::{DateTime, NaiveDate, Utc};
use common::format::{format_date, format_timestamp};
use common::{LanguageCode, Priority, UpdateKind};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{recent_update, recent_update_translation};
use crate::models::shared::double_option;
use crate::store::validate::{self, MAX_BODY_LEN, MAX_LABEL_LEN, clean, clean_optional};
use crate::store::{ContentTable, NoDetails, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RecentUpdateFields {
    #[serde(default)]
    pub kind: UpdateKind,
    #[serde(default)]
    pub priority: Priority,
    pub date: NaiveDate,
    pub link: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RecentUpdatePatch {
    pub kind: Option<UpdateKind>,
    pub priority: Option<Priority>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,
    pub is_pinned: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecentUpdateText {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecentUpdateView {
    pub id: i32,
    pub user_id: String,
    pub kind: UpdateKind,
    pub priority: Priority,
    pub date: String,
    pub link: Option<String>,
    pub is_pinned: bool,
    pub sort_order: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for recent_update::Entity {
    const KIND: &'static str = "recent-updates";

    type Translation = recent_update_translation::Entity;
    type Details = NoDetails;
    type Fields = RecentUpdateFields;
    type Patch = RecentUpdatePatch;
    type View = RecentUpdateView;

    fn owner_column() -> recent_update::Column {
        recent_update::Column::UserId
    }

    fn sort_order_column() -> recent_update::Column {
        recent_update::Column::SortOrder
    }

    fn owner_id(row: &recent_update::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &recent_update::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &RecentUpdateFields) -> StoreResult<()> {
        validate::optional_url("link", fields.link.as_deref())?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: RecentUpdateFields,
        now: DateTime<Utc>,
    ) -> recent_update::ActiveModel {
        recent_update::ActiveModel {
            user_id: Set(owner_id),
            kind: Set(fields.kind),
            priority: Set(fields.priority),
            date: Set(fields.date),
            link: Set(clean_optional(fields.link)),
            is_pinned: Set(fields.is_pinned),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(
        _current: &recent_update::Model,
        patch: &RecentUpdatePatch,
    ) -> StoreResult<()> {
        if let Some(Some(ref link)) = patch.link {
            validate::optional_url("link", Some(link))?;
        }
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: recent_update::Model,
        patch: RecentUpdatePatch,
        now: DateTime<Utc>,
    ) -> recent_update::ActiveModel {
        let mut active: recent_update::ActiveModel = current.into();
        if let Some(kind) = patch.kind {
            active.kind = Set(kind);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority);
        }
        if let Some(date) = patch.date {
            active.date = Set(date);
        }
        if let Some(link) = patch.link {
            active.link = Set(clean_optional(link));
        }
        if let Some(is_pinned) = patch.is_pinned {
            active.is_pinned = Set(is_pinned);
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(
        row: &recent_update::Model,
        text: &RecentUpdateText,
        _details: Vec<String>,
    ) -> RecentUpdateView {
        RecentUpdateView {
            id: row.id,
            user_id: row.user_id.to_string(),
            kind: row.kind,
            priority: row.priority,
            date: format_date(row.date),
            link: row.link.clone(),
            is_pinned: row.is_pinned,
            sort_order: row.sort_order,
            title: text.title.clone(),
            content: text.content.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for recent_update_translation::Entity {
    type Parent = recent_update::Entity;
    type Text = RecentUpdateText;

    fn parent_column() -> recent_update_translation::Column {
        recent_update_translation::Column::RecentUpdateId
    }

    fn language_column() -> recent_update_translation::Column {
        recent_update_translation::Column::LanguageCode
    }

    fn parent_id(row: &recent_update_translation::Model) -> i32 {
        row.recent_update_id
    }

    fn language_code(row: &recent_update_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &recent_update_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &recent_update_translation::Model) -> RecentUpdateText {
        RecentUpdateText {
            title: row.title.clone(),
            content: row.content.clone(),
        }
    }

    fn validate(text: &RecentUpdateText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("content", text.content.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: RecentUpdateText,
        now: DateTime<Utc>,
    ) -> recent_update_translation::ActiveModel {
        recent_update_translation::ActiveModel {
            recent_update_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            title: Set(clean(text.title)),
            content: Set(clean_optional(text.content)),
            created_at: Set(now),
            ..Default::default()
        }
    }

    fn replace(
        current: recent_update_translation::Model,
        text: RecentUpdateText,
        now: DateTime<Utc>,
    ) -> recent_update_translation::ActiveModel {
        let mut active: recent_update_translation::ActiveModel = current.into();
        active.title = Set(clean(text.title));
        active.content = Set(clean_optional(text.content));
        active.created_at = Set(now);
        active
    }
}
