use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One finding or contribution line under a research project.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "research_project_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub research_project_id: i32,
    #[sea_orm(belongs_to, from = "research_project_id", to = "id", on_delete = "Cascade")]
    pub research_project: HasOne<super::research_project::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,

    #[sea_orm(has_many)]
    pub translations: HasMany<super::research_project_detail_translation::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
