//! Contact details and the translated self-description shown at the top of
//! a portfolio.

use chrono::{DateTime, Utc};
use common::LanguageCode;
use common::format::format_timestamp;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{personal_info, personal_info_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, NoDetails, StoreError, StoreResult, TranslationTable};

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct PersonalInfoFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PersonalInfoPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub github: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub linkedin: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PersonalInfoText {
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PersonalInfoView {
    pub id: i32,
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub avatar_url: Option<String>,
    pub sort_order: i32,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn check_email(value: Option<&str>) -> StoreResult<()> {
    validate::optional_text("email", value, MAX_LABEL_LEN)?;
    match value {
        Some(email) if !email.trim().is_empty() && !email.contains('@') => Err(
            StoreError::validation("email", "Email must contain '@'"),
        ),
        _ => Ok(()),
    }
}

fn check_contacts(
    phone: Option<&str>,
    website: Option<&str>,
    github: Option<&str>,
    linkedin: Option<&str>,
    avatar_url: Option<&str>,
) -> StoreResult<()> {
    validate::optional_text("phone", phone, 64)?;
    validate::optional_url("website", website)?;
    validate::optional_url("github", github)?;
    validate::optional_url("linkedin", linkedin)?;
    validate::optional_url("avatar_url", avatar_url)
}

impl ContentTable for personal_info::Entity {
    const KIND: &'static str = "personal-info";

    type Translation = personal_info_translation::Entity;
    type Details = NoDetails;
    type Fields = PersonalInfoFields;
    type Patch = PersonalInfoPatch;
    type View = PersonalInfoView;

    fn owner_column() -> personal_info::Column {
        personal_info::Column::UserId
    }

    fn sort_order_column() -> personal_info::Column {
        personal_info::Column::SortOrder
    }

    fn owner_id(row: &personal_info::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &personal_info::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &PersonalInfoFields) -> StoreResult<()> {
        check_email(fields.email.as_deref())?;
        check_contacts(
            fields.phone.as_deref(),
            fields.website.as_deref(),
            fields.github.as_deref(),
            fields.linkedin.as_deref(),
            fields.avatar_url.as_deref(),
        )?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: PersonalInfoFields,
        now: DateTime<Utc>,
    ) -> personal_info::ActiveModel {
        personal_info::ActiveModel {
            user_id: Set(owner_id),
            email: Set(clean_optional(fields.email)),
            phone: Set(clean_optional(fields.phone)),
            website: Set(clean_optional(fields.website)),
            github: Set(clean_optional(fields.github)),
            linkedin: Set(clean_optional(fields.linkedin)),
            avatar_url: Set(clean_optional(fields.avatar_url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(
        _current: &personal_info::Model,
        patch: &PersonalInfoPatch,
    ) -> StoreResult<()> {
        // Only fields being set to a value need checking; `Some(None)` clears.
        fn set(field: &Option<Option<String>>) -> Option<&str> {
            field.as_ref().and_then(|v| v.as_deref())
        }
        check_email(set(&patch.email))?;
        check_contacts(
            set(&patch.phone),
            set(&patch.website),
            set(&patch.github),
            set(&patch.linkedin),
            set(&patch.avatar_url),
        )?;
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: personal_info::Model,
        patch: PersonalInfoPatch,
        now: DateTime<Utc>,
    ) -> personal_info::ActiveModel {
        let mut active: personal_info::ActiveModel = current.into();
        if let Some(email) = patch.email {
            active.email = Set(clean_optional(email));
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(clean_optional(phone));
        }
        if let Some(website) = patch.website {
            active.website = Set(clean_optional(website));
        }
        if let Some(github) = patch.github {
            active.github = Set(clean_optional(github));
        }
        if let Some(linkedin) = patch.linkedin {
            active.linkedin = Set(clean_optional(linkedin));
        }
        if let Some(avatar_url) = patch.avatar_url {
            active.avatar_url = Set(clean_optional(avatar_url));
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(
        row: &personal_info::Model,
        text: &PersonalInfoText,
        _details: Vec<String>,
    ) -> PersonalInfoView {
        PersonalInfoView {
            id: row.id,
            user_id: row.user_id.to_string(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            website: row.website.clone(),
            github: row.github.clone(),
            linkedin: row.linkedin.clone(),
            avatar_url: row.avatar_url.clone(),
            sort_order: row.sort_order,
            full_name: text.full_name.clone(),
            headline: text.headline.clone(),
            bio: text.bio.clone(),
            location: text.location.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for personal_info_translation::Entity {
    type Parent = personal_info::Entity;
    type Text = PersonalInfoText;

    fn parent_column() -> personal_info_translation::Column {
        personal_info_translation::Column::PersonalInfoId
    }

    fn language_column() -> personal_info_translation::Column {
        personal_info_translation::Column::LanguageCode
    }

    fn parent_id(row: &personal_info_translation::Model) -> i32 {
        row.personal_info_id
    }

    fn language_code(row: &personal_info_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &personal_info_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &personal_info_translation::Model) -> PersonalInfoText {
        PersonalInfoText {
            full_name: row.full_name.clone(),
            headline: row.headline.clone(),
            bio: row.bio.clone(),
            location: row.location.clone(),
        }
    }

    fn validate(text: &PersonalInfoText) -> StoreResult<()> {
        validate::required_text("full_name", &text.full_name, MAX_LABEL_LEN)?;
        validate::optional_text("headline", text.headline.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("bio", text.bio.as_deref(), MAX_BODY_LEN)?;
        validate::optional_text("location", text.location.as_deref(), MAX_LABEL_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: PersonalInfoText,
        now: DateTime<Utc>,
    ) -> personal_info_translation::ActiveModel {
        let mut active = personal_info_translation::ActiveModel {
            personal_info_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: personal_info_translation::Model,
        text: PersonalInfoText,
        now: DateTime<Utc>,
    ) -> personal_info_translation::ActiveModel {
        let mut active: personal_info_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut personal_info_translation::ActiveModel,
    text: PersonalInfoText,
    now: DateTime<Utc>,
) {
    active.full_name = Set(clean(text.full_name));
    active.headline = Set(clean_optional(text.headline));
    active.bio = Set(clean_optional(text.bio));
    active.location = Set(clean_optional(text.location));
    active.created_at = Set(now);
}
