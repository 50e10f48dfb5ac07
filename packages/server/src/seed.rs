use common::LanguageCode;
use sea_orm::sea_query::Index;
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{
    award, blog_post, education, education_detail, idea, personal_info, project, project_detail,
    publication, recent_update, research_project, research_project_detail, work_experience,
    work_experience_detail,
};
use crate::store::{ContentTable, DetailTable, LanguageRegistry, StoreError};

/// Languages registered on startup: (code, English name, native name).
const DEFAULT_LANGUAGES: &[(&str, &str, &str)] =
    &[("en", "English", "English"), ("zh", "Chinese", "中文")];

/// Register the default languages. Existing rows are left untouched.
pub async fn seed_languages(db: &DatabaseConnection) -> Result<(), StoreError> {
    let registry = LanguageRegistry::new(db);
    let mut inserted = 0u32;
    for &(code, name, native_name) in DEFAULT_LANGUAGES {
        let code = LanguageCode::parse(code)
            .map_err(|e| StoreError::validation("code", e.to_string()))?;
        if registry.register(&code, name, native_name).await? {
            inserted += 1;
        }
    }

    if inserted > 0 {
        info!("Seeded {} new languages", inserted);
    }
    Ok(())
}

/// Ensure the composite listing indexes exist.
///
/// SeaORM's schema-sync doesn't create composite non-unique indexes, so
/// they are created here on startup. Failures are logged, not fatal.
pub async fn ensure_indexes(db: &DatabaseConnection) {
    owner_index::<personal_info::Entity>(db).await;
    owner_index::<education::Entity>(db).await;
    owner_index::<work_experience::Entity>(db).await;
    owner_index::<project::Entity>(db).await;
    owner_index::<blog_post::Entity>(db).await;
    owner_index::<idea::Entity>(db).await;
    owner_index::<research_project::Entity>(db).await;
    owner_index::<publication::Entity>(db).await;
    owner_index::<award::Entity>(db).await;
    owner_index::<recent_update::Entity>(db).await;

    position_index::<education_detail::Entity>(db).await;
    position_index::<work_experience_detail::Entity>(db).await;
    position_index::<project_detail::Entity>(db).await;
    position_index::<research_project_detail::Entity>(db).await;
}

/// `(user_id, sort_order)`, matching how listings filter and order.
async fn owner_index<K: ContentTable>(db: &DatabaseConnection) {
    let name = format!("idx_{}_owner_sort", K::default().table_name());
    let stmt = Index::create()
        .if_not_exists()
        .name(&name)
        .table(K::default())
        .col(K::owner_column())
        .col(K::sort_order_column())
        .to_owned();
    create_index(db, &name, &stmt).await;
}

/// `(<parent>_id, position)` for ordered detail loading.
async fn position_index<D: DetailTable>(db: &DatabaseConnection) {
    let name = format!("idx_{}_parent_position", D::default().table_name());
    let stmt = Index::create()
        .if_not_exists()
        .name(&name)
        .table(D::default())
        .col(D::parent_column())
        .col(D::position_column())
        .to_owned();
    create_index(db, &name, &stmt).await;
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: &sea_query::IndexCreateStatement) {
    let stmt = db.get_database_backend().build(stmt);
    match db.execute_raw(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
