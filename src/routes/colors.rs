use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::color::{create_color, get_color, list_colors, update_color, delete_color};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let open_routes = Router::new()
        .route("/{storeId}/colors", get(list_colors))
        .route("/{storeId}/colors/{colorId}", get(get_color));

    let protected_routes = Router::new()
        .route("/{storeId}/colors", post(create_color))
        .route("/{storeId}/colors/{colorId}", axum::routing::patch(update_color))
        .route("/{storeId}/colors/{colorId}", axum::routing::delete(delete_color))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
