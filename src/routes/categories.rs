use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::category::{
    create_category, get_category, list_categories, update_category, delete_category,
};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let open_routes = Router::new()
        .route("/{storeId}/categories", get(list_categories))
        .route("/{storeId}/categories/{categoryId}", get(get_category));

    let protected_routes = Router::new()
        .route("/{storeId}/categories", post(create_category))
        .route("/{storeId}/categories/{categoryId}", axum::routing::patch(update_category))
        .route("/{storeId}/categories/{categoryId}", axum::routing::delete(delete_category))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
