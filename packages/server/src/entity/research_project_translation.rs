use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "research_project_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "research_project_language")]
    pub research_project_id: i32,
    #[sea_orm(belongs_to, from = "research_project_id", to = "id", on_delete = "Cascade")]
    pub research_project: HasOne<super::research_project::Entity>,

    #[sea_orm(unique_key = "research_project_language")]
    pub language_code: String,
    #[sea_orm(belongs_to, from = "language_code", to = "code", on_delete = "Restrict")]
    pub language: HasOne<super::language::Entity>,

    pub title: String,
    pub summary: Option<String>,
    /// The author's part in the project, e.g. "Lead investigator".
    pub role: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
