use chrono::{DateTime, Utc};
use common::LanguageCode;
use common::format::{format_optional_timestamp, format_timestamp};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::{blog_post, blog_post_translation};
use crate::models::shared::double_option;
use crate::store::validate::{
    self, MAX_BODY_LEN, MAX_LABEL_LEN, MAX_SUMMARY_LEN, clean, clean_optional,
};
use crate::store::{ContentTable, NoDetails, StoreResult, TranslationTable};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BlogPostFields {
    pub slug: String,
    #[serde(default)]
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct BlogPostPatch {
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub published_at: Option<Option<DateTime<Utc>>>,
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostText {
    pub title: String,
    pub summary: Option<String>,
    /// Markdown source.
    pub content: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BlogPostView {
    pub id: i32,
    pub user_id: String,
    pub slug: String,
    pub is_published: bool,
    pub published_at: Option<String>,
    pub sort_order: i32,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Publishing without an explicit timestamp stamps the post with `now`.
fn publication_time(
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (is_published, published_at) {
        (true, None) => Some(now),
        (_, at) => at,
    }
}

impl ContentTable for blog_post::Entity {
    const KIND: &'static str = "blog-posts";

    type Translation = blog_post_translation::Entity;
    type Details = NoDetails;
    type Fields = BlogPostFields;
    type Patch = BlogPostPatch;
    type View = BlogPostView;

    fn owner_column() -> blog_post::Column {
        blog_post::Column::UserId
    }

    fn sort_order_column() -> blog_post::Column {
        blog_post::Column::SortOrder
    }

    fn owner_id(row: &blog_post::Model) -> i32 {
        row.user_id
    }

    fn sort_order(row: &blog_post::Model) -> i32 {
        row.sort_order
    }

    fn validate(fields: &BlogPostFields) -> StoreResult<()> {
        validate::slug(&fields.slug)?;
        validate::optional_sort_order(Some(fields.sort_order))
    }

    fn new_row(
        owner_id: i32,
        fields: BlogPostFields,
        now: DateTime<Utc>,
    ) -> blog_post::ActiveModel {
        blog_post::ActiveModel {
            user_id: Set(owner_id),
            slug: Set(fields.slug.trim().to_string()),
            is_published: Set(fields.is_published),
            published_at: Set(publication_time(fields.is_published, fields.published_at, now)),
            sort_order: Set(fields.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn validate_patch(_current: &blog_post::Model, patch: &BlogPostPatch) -> StoreResult<()> {
        if let Some(ref slug) = patch.slug {
            validate::slug(slug)?;
        }
        validate::optional_sort_order(patch.sort_order)
    }

    fn apply_patch(
        current: blog_post::Model,
        patch: BlogPostPatch,
        now: DateTime<Utc>,
    ) -> blog_post::ActiveModel {
        let is_published = patch.is_published.unwrap_or(current.is_published);
        let published_at = patch.published_at.unwrap_or(current.published_at);

        let mut active: blog_post::ActiveModel = current.into();
        if let Some(slug) = patch.slug {
            active.slug = Set(slug.trim().to_string());
        }
        active.is_published = Set(is_published);
        active.published_at = Set(publication_time(is_published, published_at, now));
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(now);
        active
    }

    fn project(row: &blog_post::Model, text: &BlogPostText, _details: Vec<String>) -> BlogPostView {
        BlogPostView {
            id: row.id,
            user_id: row.user_id.to_string(),
            slug: row.slug.clone(),
            is_published: row.is_published,
            published_at: format_optional_timestamp(row.published_at),
            sort_order: row.sort_order,
            title: text.title.clone(),
            summary: text.summary.clone(),
            content: text.content.clone(),
            created_at: format_timestamp(row.created_at),
            updated_at: format_timestamp(row.updated_at),
        }
    }
}

impl TranslationTable for blog_post_translation::Entity {
    type Parent = blog_post::Entity;
    type Text = BlogPostText;

    fn parent_column() -> blog_post_translation::Column {
        blog_post_translation::Column::BlogPostId
    }

    fn language_column() -> blog_post_translation::Column {
        blog_post_translation::Column::LanguageCode
    }

    fn parent_id(row: &blog_post_translation::Model) -> i32 {
        row.blog_post_id
    }

    fn language_code(row: &blog_post_translation::Model) -> &str {
        &row.language_code
    }

    fn created_at(row: &blog_post_translation::Model) -> DateTime<Utc> {
        row.created_at
    }

    fn text(row: &blog_post_translation::Model) -> BlogPostText {
        BlogPostText {
            title: row.title.clone(),
            summary: row.summary.clone(),
            content: row.content.clone(),
        }
    }

    fn validate(text: &BlogPostText) -> StoreResult<()> {
        validate::required_text("title", &text.title, MAX_LABEL_LEN)?;
        validate::optional_text("summary", text.summary.as_deref(), MAX_SUMMARY_LEN)?;
        validate::optional_text("content", text.content.as_deref(), MAX_BODY_LEN)
    }

    fn new_row(
        parent_id: i32,
        language: &LanguageCode,
        text: BlogPostText,
        now: DateTime<Utc>,
    ) -> blog_post_translation::ActiveModel {
        let mut active = blog_post_translation::ActiveModel {
            blog_post_id: Set(parent_id),
            language_code: Set(language.as_str().to_string()),
            ..Default::default()
        };
        write_text(&mut active, text, now);
        active
    }

    fn replace(
        current: blog_post_translation::Model,
        text: BlogPostText,
        now: DateTime<Utc>,
    ) -> blog_post_translation::ActiveModel {
        let mut active: blog_post_translation::ActiveModel = current.into();
        write_text(&mut active, text, now);
        active
    }
}

fn write_text(
    active: &mut blog_post_translation::ActiveModel,
    text: BlogPostText,
    now: DateTime<Utc>,
) {
    active.title = Set(clean(text.title));
    active.summary = Set(clean_optional(text.summary));
    // Markdown is whitespace sensitive; store it as written.
    active.content = Set(text.content.filter(|c| !c.trim().is_empty()));
    active.created_at = Set(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn publishing_stamps_missing_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(publication_time(true, None, now), Some(now));
        assert_eq!(publication_time(true, Some(earlier), now), Some(earlier));
        assert_eq!(publication_time(false, None, now), None);
        assert_eq!(publication_time(false, Some(earlier), now), Some(earlier));
    }
}
