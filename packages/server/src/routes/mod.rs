mod v1;

use axum::Router;
use utoipa_axum::router::OpenApiRouter;

use crate::state::AppState;

/// Documented routes: languages and users.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes())
}

/// Content routes, one set per kind. Generic handlers are not part of the
/// OpenAPI document.
pub fn content_routes() -> Router<AppState> {
    Router::new().nest("/v1", v1::content_routes())
}
