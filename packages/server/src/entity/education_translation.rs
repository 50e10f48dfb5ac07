use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "education_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "education_language")]
    pub education_id: i32,
    #[sea_orm(belongs_to, from = "education_id", to = "id", on_delete = "Cascade")]
    pub education: HasOne<super::education::Entity>,

    #[sea_orm(unique_key = "education_language")]
    pub language_code: String,
    #[sea_orm(belongs_to, from = "language_code", to = "code", on_delete = "Restrict")]
    pub language: HasOne<super::language::Entity>,

    pub degree: String,
    pub field_of_study: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
