use axum::{routing::get, Router, middleware};
use crate::state::AppState;
use crate::handlers::dashboard::{get_graph_revenue, get_summary};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{storeId}/dashboard/graph-revenue", get(get_graph_revenue))
        .route("/{storeId}/dashboard/summary", get(get_summary))
        .layer(middleware::from_fn(require_auth))
}
