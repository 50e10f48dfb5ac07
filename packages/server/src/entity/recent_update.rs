use common::{Priority, UpdateKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A dated news item shown on the landing page.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recent_update")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    pub kind: UpdateKind,
    pub priority: Priority,
    pub date: Date,
    pub link: Option<String>,
    #[sea_orm(default_value = false)]
    pub is_pinned: bool,

    #[sea_orm(default_value = 0)]
    pub sort_order: i32,

    #[sea_orm(has_many)]
    pub translations: HasMany<super::recent_update_translation::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
