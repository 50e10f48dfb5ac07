use chrono::{DateTime, Utc};
use common::format::format_timestamp;
use common::{IdeaStatus, LanguageCode, Priority};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{idea, idea_translation};
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, NoDetails, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IdeaFields {
    #[serde(default)]
    pub status: IdeaStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct IdeaPatch {
    pub status: Option<IdeaStatus>,
    pub priority: Option<Priority>,
    pub is_public: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IdeaText {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IdeaView {
    pub id: i32,
    pub user_id: String,
    pub status: IdeaStatus,
    pub priority: Priority,
    pub is_public: bool,
    pub sort_order: i32,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for idea::Entity {
    const KIND: &'static str = "ideas";

    type Translation = idea_translation::Entity;
    type Details = NoDetails;
    type Fields = IdeaFields;
    type Patch = IdeaPatch;
    type View = IdeaView;

    fn owner_column() -> idea::Column {
        idea::Column::UserId
    }

    fn sort_order_column() -> idea::Column {
        idea::Column::SortOrder
    }

    fn owner_id(row: &idea::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &idea::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &IdeaFields) -> StoreResult<()> {
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(owner_id: i32, fields: IdeaFields, now: DateTime<Utc>) -> idea::ActiveModel {
        idea::ActiveModel {
            user_id: Set(owner_id),
            status: Set(fields.status),
            priority: Set(fields.priority),
            is_public: Set(fields.is_public),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(_current: &idea::Model, patch: &IdeaPatch) -> StoreResult<()> {
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: idea::Model,
        patch: IdeaPatch,
        now: DateTime<Utc>,
    ) -> idea::ActiveModel {
        let mut active: idea::ActiveModel = current.into();
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority);
        }
        if let Some(is_public) = patch.is_public {
            active.is_public = Set(is_public);
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(row: &idea::Model, text: &IdeaText, _details: Vec<String>) -> IdeaView {
        IdeaView {
            id: row.id,
            user_id: row.user_id.to_string(),
            status: row.status,
            priority: row.priority,
            is_public: row.is_public,
            sort_order: row.sort_order,
            title: text.title.clone(),
            summary: text.summary.clone(),
            content: text.content.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for idea_translation::Entity {
    type Parent = idea::Entity;
    type Text = IdeaText;

    fn parent_column() -> idea_translation::Column {
        idea_translation::Column::IdeaId
    }

    fn language_column() -> idea_translation::Column {
        idea_translation::Column::LanguageCode
    }

    fn parent_id(row: &idea_translation::Model) -> i32 {
        row.idea_id
    }

    fn language_code(row: &idea_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &idea_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &idea_translation::Model) -> IdeaText {
        IdeaText {
            title: row.title.clone(),
            summary: row.summary.clone(),
            content: row.content.clone(),
        }
    }

    fn validate(text: &IdeaText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("summary", text.summary.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("content", text.content.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: IdeaText,
        now: DateTime<Utc>,
    ) -> idea_translation::ActiveModel {
        idea_translation::ActiveModel {
            idea_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            title: Set(clean(text.title)),
            summary: Set(clean_optional(text.summary)),
            content: Set(clean_optional(text.content)),
            created_at: Set(now),
            ..Default::default()
        }
    }

    fn replace(
        current: idea_translation::Model,
        text: IdeaText,
        now: DateTime<Utc>,
    ) -> idea_translation::ActiveModel {
        let mut active: idea_translation::ActiveModel = current.into();
        active.title = Set(clean(text.title));
        active.summary = Set(clean_optional(text.summary));
        active.content = Set(clean_optional(text.content));
        active.created_at = Set(now);
        active
    }
}
