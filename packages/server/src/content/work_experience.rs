use chrono::{DateTime, NaiveDate, Utc};
use common::LanguageCode;
use common::format::{format_date, format_optional_date, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{work_experience, work_experience_detail, work_experience_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, Details, StoreError, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct WorkExperienceFields {
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    pub url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct WorkExperiencePatch {
    pub company: Option<String>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub is_current: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkExperienceText {
    pub position: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WorkExperienceView {
    pub id: i32,
    pub user_id: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub url: Option<String>,
    pub sort_order: i32,
    pub position: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A current position has no end date.
fn check_current(is_current: bool, end_date: Option<NaiveDate>) -> StoreResult<()> {
    if is_current && end_date.is_some() {
        return Err(StoreError::validation(
            "end_date",
            "A current position cannot have an end date",
        ));
    }
    Ok(())
}

impl ContentTable for work_experience::Entity {
    const KIND: &'static str = "work-experience";

    type Translation = work_experience_translation::Entity;
    type Details = Details<work_experience_detail::Entity>;
    type Fields = WorkExperienceFields;
    type Patch = WorkExperiencePatch;
    type View = WorkExperienceView;

    fn owner_column() -> work_experience::Column {
        work_experience::Column::UserId
    }

    fn sort_order_column() -> work_experience::Column {
        work_experience::Column::SortOrder
    }

    fn owner_id(row: &work_experience::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &work_experience::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &WorkExperienceFields) -> StoreResult<()> {
        validate::required_text("company", &fields.company, MAX_LABEL_LEN)?;
        validate::optional_url("url", fields.url.as_deref())?;
        validate::date_range(Some(fields.start_date), fields.end_date)?;
        check_current(fields.is_current, fields.end_date)?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: WorkExperienceFields,
        now: DateTime<Utc>,
    ) -> work_experience::ActiveModel {
        work_experience::ActiveModel {
            user_id: Set(owner_id),
            company: Set(clean(fields.company)),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            is_current: Set(fields.is_current),
            url: Set(clean_optional(fields.url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(
        current: &work_experience::Model,
        patch: &WorkExperiencePatch,
    ) -> StoreResult<()> {
        if let Some(ref company) = patch.company {
            validate::required_text("company", company, MAX_LABEL_LEN)?;
        }
        if let Some(Some(ref url)) = patch.url {
            validate::optional_url("url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)?;
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        validate::date_range(Some(start), end)?;
        check_current(patch.is_current.unwrap_or(current.is_current), end)
    }

    fn apply_patch(
        current: work_experience::Model,
        patch: WorkExperiencePatch,
        now: DateTime<Utc>,
    ) -> work_experience::ActiveModel {
        let mut active: work_experience::ActiveModel = current.into();
        if let Some(company) = patch.company {
            active.company = Set(clean(company));
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(is_current) = patch.is_current {
            active.is_current = Set(is_current);
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
        row: &work_experience::Model,
        text: &WorkExperienceText,
        details: Vec<String>,
    ) -> WorkExperienceView {
        WorkExperienceView {
            id: row.id,
            user_id: row.user_id.to_string(),
            company: row.company.clone(),
            start_date: format_date(row.start_date),
            end_date: format_optional_date(row.end_date),
            is_current: row.is_current,
            url: row.url.clone(),
            sort_order: row.sort_order,
            position: text.position.clone(),
            location: text.location.clone(),
            description: text.description.clone(),
            details,
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for work_experience_translation::Entity {
    type Parent = work_experience::Entity;
    type Text = WorkExperienceText;

    fn parent_column() -> work_experience_translation::Column {
        work_experience_translation::Column::WorkExperienceId
    }

    fn language_column() -> work_experience_translation::Column {
        work_experience_translation::Column::LanguageCode
    }

    fn parent_id(row: &work_experience_translation::Model) -> i32 {
        row.work_experience_id
    }

    fn language_code(row: &work_experience_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &work_experience_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &work_experience_translation::Model) -> WorkExperienceText {
        WorkExperienceText {
            position: row.position.clone(),
            location: row.location.clone(),
            description: row.description.clone(),
        }
    }

    fn validate(text: &WorkExperienceText) -> StoreResult<()> {
        validate::required_text("position", &text.position, MAX_LABEL_LEN)?;
        validate::optional_text("location", text.location.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("description", text.description.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: WorkExperienceText,
        now: DateTime<Utc>,
    ) -> work_experience_translation::ActiveModel {
        let mut active = work_experience_translation::ActiveModel {
            work_experience_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: work_experience_translation::Model,
        text: WorkExperienceText,
        now: DateTime<Utc>,
    ) -> work_experience_translation::ActiveModel {
        let mut active: work_experience_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut work_experience_translation::ActiveModel,
    text: WorkExperienceText,
    now: DateTime<Utc>,
) {
    active.position = Set(clean(text.position));
    active.location = Set(clean_optional(text.location));
    active.description = Set(clean_optional(text.description));
    active.created_at = Set(now);
}

detail_tables! {
    work_experience_detail (work_experience_id: WorkExperienceId) under work_experience,
    work_experience_detail_translation (work_experience_detail_id: WorkExperienceDetailId)
}
