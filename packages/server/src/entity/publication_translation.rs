use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publication_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "publication_language")]
    pub publication_id: i32,
    #[sea_orm(belongs_to, from = "publication_id", to = "id", on_delete = "Cascade")]
    pub publication: HasOne<super::publication::Entity>,

    #[sea_orm(unique_key = "publication_language")]
    pub language_code: String,
    #[sea_orm(belongs_to, from = "language_code", to = "code", on_delete = "Restrict")]
    pub language: HasOne<super::language::Entity>,

    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub abstract_text: Option<String>,
    pub summary: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
