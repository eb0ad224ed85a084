use axum::{
    routing::{get, post},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::billboard::{
    create_billboard, get_billboard, list_billboards, update_billboard, delete_billboard,
};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    // The storefront renders billboards without a token
    let open_routes = Router::new()
        .route("/{storeId}/billboards", get(list_billboards))
        .route("/{storeId}/billboards/{billboardId}", get(get_billboard));

    let protected_routes = Router::new()
        .route("/{storeId}/billboards", post(create_billboard))
        .route("/{storeId}/billboards/{billboardId}", axum::routing::patch(update_billboard))
        .route("/{storeId}/billboards/{billboardId}", axum::routing::delete(delete_billboard))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
