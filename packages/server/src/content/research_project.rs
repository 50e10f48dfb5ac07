use chrono::{DateTime, NaiveDate, Utc};
use common::LanguageCode;
use common::format::{format_date, format_optional_date, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{research_project, research_project_detail, research_project_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, Details, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ResearchProjectFields {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ResearchProjectPatch {
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResearchProjectText {
    pub title: String,
    pub summary: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ResearchProjectView {
    pub id: i32,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: bool,
    pub url: Option<String>,
    pub sort_order: i32,
    pub title: String,
    pub summary: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for research_project::Entity {
    const KIND: &'static str = "research-projects";

    type Translation = research_project_translation::Entity;
    type Details = Details<research_project_detail::Entity>;
    type Fields = ResearchProjectFields;
    type Patch = ResearchProjectPatch;
    type View = ResearchProjectView;

    fn owner_column() -> research_project::Column {
        research_project::Column::UserId
    }

    fn sort_order_column() -> research_project::Column {
        research_project::Column::SortOrder
    }

    fn owner_id(row: &research_project::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &research_project::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &ResearchProjectFields) -> StoreResult<()> {
        validate::optional_url("url", fields.url.as_deref())?;
        validate::date_range(Some(fields.start_date), fields.end_date)?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: ResearchProjectFields,
        now: DateTime<Utc>,
    ) -> research_project::ActiveModel {
        research_project::ActiveModel {
            user_id: Set(owner_id),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            is_active: Set(fields.is_active),
            url: Set(clean_optional(fields.url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(
        current: &research_project::Model,
        patch: &ResearchProjectPatch,
    ) -> StoreResult<()> {
        if let Some(Some(ref url)) = patch.url {
            validate::optional_url("url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)?;
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        validate::date_range(Some(start), end)
    }

    fn apply_patch(
        current: research_project::Model,
        patch: ResearchProjectPatch,
        now: DateTime<Utc>,
    ) -> research_project::ActiveModel {
        let mut active: research_project::ActiveModel = current.into();
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(url) = patch.url {
            active.url = Set(clean_optional(url));
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(
        row: &research_project::Model,
        text: &ResearchProjectText,
        details: Vec<String>,
    ) -> ResearchProjectView {
        ResearchProjectView {
            id: row.id,
            user_id: row.user_id.to_string(),
            start_date: format_date(row.start_date),
            end_date: format_optional_date(row.end_date),
            is_active: row.is_active,
            url: row.url.clone(),
            sort_order: row.sort_order,
            title: text.title.clone(),
            summary: text.summary.clone(),
            role: text.role.clone(),
            description: text.description.clone(),
            details,
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for research_project_translation::Entity {
    type Parent = research_project::Entity;
    type Text = ResearchProjectText;

    fn parent_column() -> research_project_translation::Column {
        research_project_translation::Column::ResearchProjectId
    }

    fn language_column() -> research_project_translation::Column {
        research_project_translation::Column::LanguageCode
    }

    fn parent_id(row: &research_project_translation::Model) -> i32 {
        row.research_project_id
    }

    fn language_code(row: &research_project_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &research_project_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &research_project_translation::Model) -> ResearchProjectText {
        ResearchProjectText {
            title: row.title.clone(),
            summary: row.summary.clone(),
            role: row.role.clone(),
            description: row.description.clone(),
        }
    }

    fn validate(text: &ResearchProjectText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("summary", text.summary.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("role", text.role.as_deref(), MAX_LABEL_LEN)?;
        validate::optional_text("description", text.description.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: ResearchProjectText,
        now: DateTime<Utc>,
    ) -> research_project_translation::ActiveModel {
        let mut active = research_project_translation::ActiveModel {
            research_project_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: research_project_translation::Model,
        text: ResearchProjectText,
        now: DateTime<Utc>,
    ) -> research_project_translation::ActiveModel {
        let mut active: research_project_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut research_project_translation::ActiveModel,
    text: ResearchProjectText,
    now: DateTime<Utc>,
) {
    active.title = Set(clean(text.title));
    active.summary = Set(clean_optional(text.summary));
    active.role = Set(clean_optional(text.role));
    active.description = Set(clean_optional(text.description));
    active.created_at = Set(now);
}

detail_tables! {
    research_project_detail (research_project_id: ResearchProjectId) under research_project,
    research_project_detail_translation (research_project_detail_id: ResearchProjectDetailId)
}
