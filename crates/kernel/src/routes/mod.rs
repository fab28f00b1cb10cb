//! HTTP route handlers.

pub mod api;
pub mod front;
pub mod health;
pub mod helpers;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
///
/// The front router owns the catch-all page route, so it is merged last.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(api::router())
        .merge(front::router())
        .with_state(state)
}
