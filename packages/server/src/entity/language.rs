use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "language")]
pub struct Model {
    /// Normalized language tag (e.g. "en", "zh"). Immutable once created.
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    /// English display name.
    pub name: String,
    /// Name in the language itself.
    pub native_name: String,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
