//! API router.
//!
//! Returns a composable `Router` over [`AppState`]. Prediction routes
//! extract the caller's address via `ConnectInfo`, so the server must
//! be built with `into_make_service_with_connect_info`.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::state::AppState;

/// Build the full API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/health", get(endpoints::health::check))
        .route("/prediction/iris", post(endpoints::iris::predict))
        .route(
            "/prediction/advertising",
            post(endpoints::advertising::predict),
        )
        .route("/llm/chat", post(endpoints::review::chat))
        .with_state(state)
}
