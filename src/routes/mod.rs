pub mod stores;
pub mod billboards;
pub mod categories;
pub mod sizes;
pub mod colors;
pub mod products;
pub mod orders;
pub mod checkout;
pub mod dashboard;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(stores::routes())
        .merge(billboards::routes())
        .merge(categories::routes())
        .merge(sizes::routes())
        .merge(colors::routes())
        .merge(products::routes())
        .merge(orders::routes())
        .merge(checkout::routes())
        .merge(dashboard::routes())
}
