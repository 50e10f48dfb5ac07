use chrono::{DateTime, NaiveDate, Utc};
use common::format::{format_date, format_timestamp};
use common::{LanguageCode, PublicationKind};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{publication, publication_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, NoDetails, StoreResult, TranslationTable};

const MAX_AUTHORS_LEN: usize = 4096;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PublicationFields {
    pub authors: String,
    pub venue: Option<String>,
    pub published_on: NaiveDate,
    #[serde(default)]
    pub kind: PublicationKind,
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PublicationPatch {
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub venue: Option<Option<String>>,
    pub published_on: Option<NaiveDate>,
    pub kind: Option<PublicationKind>,
    #[serde(default, deserialize_with = "double_option")]
    pub doi: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PublicationText {
    pub title: String,
    pub abstract_text: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicationView {
    pub id: i32,
    pub user_id: String,
    pub authors: String,
    pub venue: Option<String>,
    pub published_on: String,
    pub kind: PublicationKind,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub sort_order: i32,
    pub title: String,
    pub abstract_text: Option<String>,
    pub summary: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentTable for publication::Entity {
    const KIND: &'static str = "publications";

    type Translation = publication_translation::Entity;
    type Details = NoDetails;
    type Fields = PublicationFields;
    type Patch = PublicationPatch;
    type View = PublicationView;

    fn owner_column() -> publication::Column {
        publication::Column::UserId
    }

    fn sort_order_column() -> publication::Column {
        publication::Column::SortOrder
    }

    fn owner_id(row: &publication::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &publication::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &PublicationFields) -> StoreResult<()> {
        validate::required_text("authors", &fields.authors, MAX_AUTHORS_LEN)?;
        validate::optional_text("venue", fields.venue.as_deref(), MAX_LABEL_LEN)?;
        validate::optional_text("doi", fields.doi.as_deref(), MAX_LABEL_LEN)?;
        validate::optional_url("url", fields.url.as_deref())?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: PublicationFields,
        now: DateTime<Utc>,
    ) -> publication::ActiveModel {
        publication::ActiveModel {
            user_id: Set(owner_id),
            authors: Set(clean(fields.authors)),
            venue: Set(clean_optional(fields.venue)),
            published_on: Set(fields.published_on),
            kind: Set(fields.kind),
            doi: Set(clean_optional(fields.doi)),
            url: Set(clean_optional(fields.url)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(_current: &publication::Model, patch: &PublicationPatch) -> StoreResult<()> {
        if let Some(ref authors) = patch.authors {
            validate::required_text("authors", authors, MAX_AUTHORS_LEN)?;
        }
        if let Some(Some(ref venue)) = patch.venue {
            validate::optional_text("venue", Some(venue), MAX_LABEL_LEN)?;
        }
        if let Some(Some(ref doi)) = patch.doi {
            validate::optional_text("doi", Some(doi), MAX_LABEL_LEN)?;
        }
        if let Some(Some(ref url)) = patch.url {
            validate::optional_url("url", Some(url))?;
        }
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: publication::Model,
        patch: PublicationPatch,
        now: DateTime<Utc>,
    ) -> publication::ActiveModel {
        let mut active: publication::ActiveModel = current.into();
        if let Some(authors) = patch.authors {
            active.authors = Set(clean(authors));
        }
        if let Some(venue) = patch.venue {
            active.venue = Set(clean_optional(venue));
        }
        if let Some(published_on) = patch.published_on {
            active.published_on = Set(published_on);
        }
        if let Some(kind) = patch.kind {
            active.kind = Set(kind);
        }
        if let Some(doi) = patch.doi {
            active.doi = Set(clean_optional(doi));
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
        row: &publication::Model,
        text: &PublicationText,
        _details: Vec<String>,
    ) -> PublicationView {
        PublicationView {
            id: row.id,
            user_id: row.user_id.to_string(),
            authors: row.authors.clone(),
            venue: row.venue.clone(),
            published_on: format_date(row.published_on),
            kind: row.kind,
            doi: row.doi.clone(),
            url: row.url.clone(),
            sort_order: row.sort_order,
            title: text.title.clone(),
            abstract_text: text.abstract_text.clone(),
            summary: text.summary.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for publication_translation::Entity {
    type Parent = publication::Entity;
    type Text = PublicationText;

    fn parent_column() -> publication_translation::Column {
        publication_translation::Column::PublicationId
    }

    fn language_column() -> publication_translation::Column {
        publication_translation::Column::LanguageCode
    }

    fn parent_id(row: &publication_translation::Model) -> i32 {
        row.publication_id
    }

    fn language_code(row: &publication_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &publication_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &publication_translation::Model) -> PublicationText {
        PublicationText {
            title: row.title.clone(),
            abstract_text: row.abstract_text.clone(),
            summary: row.summary.clone(),
        }
    }

    fn validate(text: &PublicationText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("abstract_text", text.abstract_text.as_deref(), MAX_BODY_LEN)?;
        validate::optional_text("summary", text.summary.as_deref(), MAX_SUMMARY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: PublicationText,
        now: DateTime<Utc>,
    ) -> publication_translation::ActiveModel {
        let mut active = publication_translation::ActiveModel {
            publication_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: publication_translation::Model,
        text: PublicationText,
        now: DateTime<Utc>,
    ) -> publication_translation::ActiveModel {
        let mut active: publication_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut publication_translation::ActiveModel,
    text: PublicationText,
    now: DateTime<Utc>,
) {
    active.title = Set(clean(text.title));
    active.abstract_text = Set(clean_optional(text.abstract_text));
    active.summary = Set(clean_optional(text.summary));
    active.created_at = Set(now);
}
