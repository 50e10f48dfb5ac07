use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::language;

#[derive(Serialize, utoipa::ToSchema)]
pub struct LanguageResponse {
    #[schema(example = "zh")]
    pub code: String,
    #[schema(example = "Chinese")]
    pub name: String,
    #[schema(example = "中文")]
    pub native_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<language::Model> for LanguageResponse {
    fn from(m: language::Model) -> Self {
        Self {
            code: m.code,
            name: m.name,
            native_name: m.native_name,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
