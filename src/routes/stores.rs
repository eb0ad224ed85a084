use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::store::{create_store, get_store, list_stores, update_store, delete_store};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    // The storefront reads a store's name without a token
    let open_routes = Router::new()
        .route("/stores/{storeId}", get(get_store));

    let protected_routes = Router::new()
        .route("/stores", post(create_store))
        .route("/stores", get(list_stores))
        .route("/stores/{storeId}", axum::routing::patch(update_store))
        .route("/stores/{storeId}", axum::routing::delete(delete_store))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
