use axum::{routing::post, Router};
use crate::state::AppState;
use crate::handlers::checkout::create_checkout;

pub fn routes() -> Router<AppState> {
    // Anonymous storefront shoppers place orders here
    Router::new().route("/{storeId}/checkout", post(create_checkout))
}
