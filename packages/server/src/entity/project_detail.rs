use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One feature or highlight line under a project.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub project_id: i32,
    #[sea_orm(belongs_to, from = "project_id", to = "id", on_delete = "Cascade")]
    pub project: HasOne<super::project::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,

    #[sea_orm(has_many)]
    pub translations: HasMany<super::project_detail_translation::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
