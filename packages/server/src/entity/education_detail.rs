use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One bullet under an education entry (courses, honours, thesis topic).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "education_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub education_id: i32,
    #[sea_orm(belongs_to, from = "education_id", to = "id", on_delete = "Cascade")]
    pub education: HasOne<super::education::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,

    #[sea_orm(has_many)]
    pub translations: HasMany<super::education_detail_translation::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
