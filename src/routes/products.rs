use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::product::{
    create_product, get_product, list_products, update_product, delete_product,
};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let open_routes = Router::new()
        .route("/{storeId}/products", get(list_products))
        .route("/{storeId}/products/{productId}", get(get_product));

    let protected_routes = Router::new()
        .route("/{storeId}/products", post(create_product))
        .route("/{storeId}/products/{productId}", axum::routing::patch(update_product))
        .route("/{storeId}/products/{productId}", axum::routing::delete(delete_product))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
