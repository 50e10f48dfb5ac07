use chrono::{DateTime, NaiveDate, Utc};
use common::LanguageCode;
use common::format::{format_date, format_optional_date, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{education, education_translation};
use crate::models::shared::double_option;
use crate::store::validate::{self, MAX_BODY_LEN, MAX_LABEL_LEN, clean, clean_optional};
use crate::store::{ContentTable, Details, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EducationFields {
    pub institution: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducationText {
    pub degree: String,
    pub field_of_study: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EducationView {
    pub id: i32,
    pub user_id: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub url: Option<String>,
    pub sort_order: i32,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for education::Entity {
    const KIND: &'static str = "education";

    type Translation = education_translation::Entity;
    type Details = Details<crate::entity::education_detail::Entity>;
    type Fields = EducationFields;
    type Patch = EducationPatch;
    type View = EducationView;

    fn owner_column() -> education::Column {
        education::Column::UserId
    }

    fn sort_order_column() -> education::Column {
        education::Column::SortOrder
    }

    fn owner_id(row: &education::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &education::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &EducationFields) -> StoreResult<()> {
        validate::required_text("institution", &fields.institution, MAX_LABEL_LEN)?;
        validate::optional_url("url", fields.url.as_deref())?;
        validate::date_range(Some(fields.start_date), fields.end_date)?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: EducationFields,
        now: DateTime<Utc>,
    ) -> education::ActiveModel {
        education::ActiveModel {
            user_id: Set(owner_id),
            institution: Set(clean(fields.institution)),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            url: Set(clean_optional(fields.url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(current: &education::Model, patch: &EducationPatch) -> StoreResult<()> {
        if let Some(ref institution) = patch.institution {
            validate::required_text("institution", institution, MAX_LABEL_LEN)?;
        }
        if let Some(Some(ref url)) = patch.url {
            validate::optional_url("url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)?;
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        validate::date_range(Some(start), end)
    }

    fn apply_patch(
        current: education::Model,
        patch: EducationPatch,
        now: DateTime<Utc>,
    ) -> education::ActiveModel {
        let mut active: education::ActiveModel = current.into();
        if let Some(institution) = patch.institution {
            active.institution = Set(clean(institution));
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
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
        row: &education::Model,
        text: &EducationText,
        details: Vec<String>,
    ) -> EducationView {
        EducationView {
            id: row.id,
            user_id: row.user_id.to_string(),
            institution: row.institution.clone(),
            start_date: format_date(row.start_date),
            end_date: format_optional_date(row.end_date),
            url: row.url.clone(),
            sort_order: row.sort_order,
            degree: text.degree.clone(),
            field_of_study: text.field_of_study.clone(),
            description: text.description.clone(),
            details,
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for education_translation::Entity {
    type Parent = education::Entity;
    type Text = EducationText;

    fn parent_column() -> education_translation::Column {
        education_translation::Column::EducationId
    }

    fn language_column() -> education_translation::Column {
        education_translation::Column::LanguageCode
    }

    fn parent_id(row: &education_translation::Model) -> i32 {
        row.education_id
    }

    fn language_code(row: &education_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &education_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &education_translation::Model) -> EducationText {
        EducationText {
            degree: row.degree.clone(),
            field_of_study: row.field_of_study.clone(),
            description: row.description.clone(),
        }
    }

    fn validate(text: &EducationText) -> StoreResult<()> {
        validate::required_text("degree", &text.degree, MAX_LABEL_LEN)?;
        validate::optional_text("field_of_study", text.field_of_study.as_deref(), MAX_LABEL_LEN)?;
        validate::optional_text("description", text.description.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: EducationText,
        now: DateTime<Utc>,
    ) -> education_translation::ActiveModel {
        let mut active = education_translation::ActiveModel {
            education_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: education_translation::Model,
        text: EducationText,
        now: DateTime<Utc>,
    ) -> education_translation::ActiveModel {
        let mut active: education_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut education_translation::ActiveModel,
    text: EducationText,
    now: DateTime<Utc>,
) {
    active.degree = Set(clean(text.degree));
    active.field_of_study = Set(clean_optional(text.field_of_study));
    active.description = Set(clean_optional(text.description));
    active.created_at = Set(now);
}

detail_tables! {
    education_detail (education_id: EducationId) under education,
    education_detail_translation (education_detail_id: EducationDetailId)
}
