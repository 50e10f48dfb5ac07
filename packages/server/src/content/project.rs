use chrono::{DateTime, NaiveDate, Utc};
use common::LanguageCode;
use common::format::{format_optional_date, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{project, project_detail, project_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, Details, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProjectFields {
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub repo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub live_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProjectText {
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProjectView {
    pub id: i32,
    pub user_id: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for project::Entity {
    const KIND: &'static str = "projects";

    type Translation = project_translation::Entity;
    type Details = Details<project_detail::Entity>;
    type Fields = ProjectFields;
    type Patch = ProjectPatch;
    type View = ProjectView;

    fn owner_column() -> project::Column {
        project::Column::UserId
    }

    fn sort_order_column() -> project::Column {
        project::Column::SortOrder
    }

    fn owner_id(row: &project::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &project::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &ProjectFields) -> StoreResult<()> {
        validate::optional_url("repo_url", fields.repo_url.as_deref())?;
        validate::optional_url("live_url", fields.live_url.as_deref())?;
        validate::date_range(fields.start_date, fields.end_date)?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(owner_id: i32, fields: ProjectFields, now: DateTime<Utc>) -> project::ActiveModel {
        project::ActiveModel {
            user_id: Set(owner_id),
            repo_url: Set(clean_optional(fields.repo_url)),
            live_url: Set(clean_optional(fields.live_url)),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            is_featured: Set(fields.is_featured),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(current: &project::Model, patch: &ProjectPatch) -> StoreResult<()> {
        if let Some(Some(ref url)) = patch.repo_url {
            validate::optional_url("repo_url", Some(url))?;
        }
        if let Some(Some(ref url)) = patch.live_url {
            validate::optional_url("live_url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)?;
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        validate::date_range(start, end)
    }

    fn apply_patch(
        current: project::Model,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> project::ActiveModel {
        let mut active: project::ActiveModel = current.into();
        if let Some(repo_url) = patch.repo_url {
            active.repo_url = Set(clean_optional(repo_url));
        }
        if let Some(live_url) = patch.live_url {
            active.live_url = Set(clean_optional(live_url));
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(is_featured) = patch.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(row: &project::Model, text: &ProjectText, details: Vec<String>) -> ProjectView {
        ProjectView {
            id: row.id,
            user_id: row.user_id.to_string(),
            repo_url: row.repo_url.clone(),
            live_url: row.live_url.clone(),
            start_date: format_optional_date(row.start_date),
            end_date: format_optional_date(row.end_date),
            is_featured: row.is_featured,
            sort_order: row.sort_order,
            title: text.title.clone(),
            summary: text.summary.clone(),
            description: text.description.clone(),
            details,
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for project_translation::Entity {
    type Parent = project::Entity;
    type Text = ProjectText;

    fn parent_column() -> project_translation::Column {
        project_translation::Column::ProjectId
    }

    fn language_column() -> project_translation::Column {
        project_translation::Column::LanguageCode
    }

    fn parent_id(row: &project_translation::Model) -> i32 {
        row.project_id
    }

    fn language_code(row: &project_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &project_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &project_translation::Model) -> ProjectText {
        ProjectText {
            title: row.title.clone(),
            summary: row.summary.clone(),
            description: row.description.clone(),
        }
    }

    fn validate(text: &ProjectText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("summary", text.summary.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("description", text.description.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: ProjectText,
        now: DateTime<Utc>,
    ) -> project_translation::ActiveModel {
        let mut active = project_translation::ActiveModel {
            project_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: project_translation::Model,
        text: ProjectText,
        now: DateTime<Utc>,
    ) -> project_translation::ActiveModel {
        let mut active: project_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut project_translation::ActiveModel,
    text: ProjectText,
    now: DateTime<Utc>,
) {
    active.title = Set(clean(text.title));
    active.summary = Set(clean_optional(text.summary));
    active.description = Set(clean_optional(text.description));
    active.created_at = Set(now);
}

detail_tables! {
    project_detail (project_id: ProjectId) under project,
    project_detail_translation (project_detail_id: ProjectDetailId)
}
