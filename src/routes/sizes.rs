use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::size::{create_size, get_size, list_sizes, update_size, delete_size};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let open_routes = Router::new()
        .route("/{storeId}/sizes", get(list_sizes))
        .route("/{storeId}/sizes/{sizeId}", get(get_size));

    let protected_routes = Router::new()
        .route("/{storeId}/sizes", post(create_size))
        .route("/{storeId}/sizes/{sizeId}", axum::routing::patch(update_size))
        .route("/{storeId}/sizes/{sizeId}", axum::routing::delete(delete_size))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
