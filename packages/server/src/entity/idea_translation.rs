use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "idea_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "idea_language")]
    pub idea_id: i32,
    #[sea_orm(belongs_to, from = "idea_id", to = "id", on_delete = "Cascade")]
    pub idea: HasOne<super::idea::Entity>,

    #[sea_orm(unique_key = "idea_language")]
    pub language_code: String,
    #[sea_orm(belongs_to, from = "language_code", to = "code", on_delete = "Restrict")]
    pub language: HasOne<super::language::Entity>,

    pub title: String,
    pub summary: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
