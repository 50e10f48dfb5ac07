use axum::{
    Router,
    routing::{get, patch, put},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::entity::{
    award, blog_post, education, education_detail, idea, personal_info, project, project_detail,
    publication, recent_update, research_project, research_project_detail, work_experience,
    work_experience_detail,
};
use crate::handlers::{self, content};
use crate::state::AppState;
use crate::store::{ContentTable, DetailTable};

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/languages", language_routes())
        .nest("/users", user_routes())
}

fn language_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::language::list_languages))
        .routes(routes!(handlers::language::get_language))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::list_users,
            handlers::user::create_user
        ))
        .routes(routes!(handlers::user::get_user, handlers::user::delete_user))
        .routes(routes!(handlers::user::get_resume))
}

/// Routes of every content kind.
///
/// The handlers are generic over the kind, so these routes are served but
/// left out of the OpenAPI document.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .merge(kind::<personal_info::Entity>())
        .merge(
            kind::<education::Entity>()
                .merge(details::<education::Entity, education_detail::Entity>()),
        )
        .merge(
            kind::<work_experience::Entity>()
                .merge(details::<work_experience::Entity, work_experience_detail::Entity>()),
        )
        .merge(
            kind::<project::Entity>().merge(details::<project::Entity, project_detail::Entity>()),
        )
        .merge(kind::<blog_post::Entity>())
        .merge(kind::<idea::Entity>())
        .merge(
            kind::<research_project::Entity>()
                .merge(details::<research_project::Entity, research_project_detail::Entity>()),
        )
        .merge(kind::<publication::Entity>())
        .merge(kind::<award::Entity>())
        .merge(kind::<recent_update::Entity>())
}

/// CRUD and translation routes of one kind, under `/{kind}`.
fn kind<K: ContentTable>() -> Router<AppState> {
    let base = format!("/{}", K::KIND);
    Router::new()
        .route(&base, get(content::list::<K>).post(content::create::<K>))
        .route(
            &format!("{base}/{{id}}"),
            get(content::get::<K>)
                .patch(content::update::<K>)
                .delete(content::delete::<K>),
        )
        .route(
            &format!("{base}/{{id}}/translations"),
            get(content::list_translations::<K>),
        )
        .route(
            &format!("{base}/{{id}}/translations/{{lang}}"),
            get(content::get_translation::<K>)
                .put(content::put_translation::<K>)
                .delete(content::delete_translation::<K>),
        )
}

/// Detail line routes of a kind that has them.
fn details<K, D>() -> Router<AppState>
where
    K: ContentTable,
    D: DetailTable<Parent = K>,
{
    let base = format!("/{}/{{id}}/details", K::KIND);
    Router::new()
        .route(
            &base,
            get(content::list_details::<D>).post(content::create_detail::<D>),
        )
        .route(
            &format!("{base}/{{detail_id}}"),
            patch(content::update_detail::<D>).delete(content::delete_detail::<D>),
        )
        .route(
            &format!("{base}/{{detail_id}}/translations/{{lang}}"),
            put(content::put_detail_translation::<D>)
                .delete(content::delete_detail_translation::<D>),
        )
}
