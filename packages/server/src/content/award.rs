use chrono::{DateTime, NaiveDate, Utc};
use common::LanguageCode;
use common::format::{format_date, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{award, award_translation};
use crate::models::shared::double_option;
use crate::store::validate::{self, MAX_BODY_LEN, MAX_LABEL_LEN, clean, clean_optional};
use crate::store::{ContentTable, NoDetails, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AwardFields {
    pub issuer: Option<String>,
    pub awarded_on: NaiveDate,
    pub url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AwardPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub issuer: Option<Option<String>>,
    pub awarded_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AwardText {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AwardView {
    pub id: i32,
    pub user_id: String,
    pub issuer: Option<String>,
    pub awarded_on: String,
    pub url: Option<String>,
    pub sort_order: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for award::Entity {
    const KIND: &'static str = "awards";

    type Translation = award_translation::Entity;
    type Details = NoDetails;
    type Fields = AwardFields;
    type Patch = AwardPatch;
    type View = AwardView;

    fn owner_column() -> award::Column {
        award::Column::UserId
    }

    fn sort_order_column() -> award::Column {
        award::Column::SortOrder
    }

    fn owner_id(row: &award::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &award::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &AwardFields) -> StoreResult<()> {
        validate::optional_text("issuer", fields.issuer.as_deref(), MAX_LABEL_LEN)?;
        validate::optional_url("url", fields.url.as_deref())?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(owner_id: i32, fields: AwardFields, now: DateTime<Utc>) -> award::ActiveModel {
        award::ActiveModel {
            user_id: Set(owner_id),
            issuer: Set(clean_optional(fields.issuer)),
            awarded_on: Set(fields.awarded_on),
            url: Set(clean_optional(fields.url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(_current: &award::Model, patch: &AwardPatch) -> StoreResult<()> {
        if let Some(Some(ref issuer)) = patch.issuer {
            validate::optional_text("issuer", Some(issuer), MAX_LABEL_LEN)?;
        }
        if let Some(Some(ref url)) = patch.url {
            validate::optional_url("url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: award::Model,
        patch: AwardPatch,
        now: DateTime<Utc>,
    ) -> award::ActiveModel {
        let mut active: award::ActiveModel = current.into();
        if let Some(issuer) = patch.issuer {
            active.issuer = Set(clean_optional(issuer));
        }
        if let Some(awarded_on) = patch.awarded_on {
            active.awarded_on = Set(awarded_on);
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

    fn project(row: &award::Model, text: &AwardText, _details: Vec<String>) -> AwardView {
        AwardView {
            id: row.id,
            user_id: row.user_id.to_string(),
            issuer: row.issuer.clone(),
            awarded_on: format_date(row.awarded_on),
            url: row.url.clone(),
            sort_order: row.sort_order,
            title: text.title.clone(),
            description: text.description.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for award_translation::Entity {
    type Parent = award::Entity;
    type Text = AwardText;

    fn parent_column() -> award_translation::Column {
        award_translation::Column::AwardId
    }

    fn language_column() -> award_translation::Column {
        award_translation::Column::LanguageCode
    }

    fn parent_id(row: &award_translation::Model) -> i32 {
        row.award_id
    }

    fn language_code(row: &award_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &award_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &award_translation::Model) -> AwardText {
        AwardText {
            title: row.title.clone(),
            description: row.description.clone(),
        }
    }

    fn validate(text: &AwardText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("description", text.description.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: AwardText,
        now: DateTime<Utc>,
    ) -> award_translation::ActiveModel {
        award_translation::ActiveModel {
            award_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            title: Set(clean(text.title)),
            description: Set(clean_optional(text.description)),
            created_at: Set(now),
            ..Default::default()
        }
    }

    fn replace(
        current: award_translation::Model,
        text: AwardText,
        now: DateTime<Utc>,
    ) -> award_translation::ActiveModel {
        let mut active: award_translation::ActiveModel = current.into();
        active.title = Set(clean(text.title));
        active.description = Set(clean_optional(text.description));
        active.created_at = Set(now);
        active
    }
}
