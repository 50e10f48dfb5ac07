use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One responsibility or achievement line under a job.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_experience_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub work_experience_id: i32,
    #[sea_orm(belongs_to, from = "work_experience_id", to = "id", on_delete = "Cascade")]
    pub work_experience: HasOne<super::work_experience::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,

    #[sea_orm(has_many)]
    pub translations: HasMany<super::work_experience_detail_translation::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
