use axum::{
    routing::{get, patch},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::order::{confirm_payment, delete_order, get_order, list_orders};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    // The payment callback authenticates with a shared secret header, not a
    // user token, so it stays outside the auth middleware
    let open_routes = Router::new()
        .route("/{storeId}/orders/{orderId}/payment", patch(confirm_payment));

    let protected_routes = Router::new()
        .route("/{storeId}/orders", get(list_orders))
        .route("/{storeId}/orders/{orderId}", get(get_order))
        .route("/{storeId}/orders/{orderId}", axum::routing::delete(delete_order))
        .layer(middleware::from_fn(require_auth));

    open_routes.merge(protected_routes)
}
