use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::state::SharedState;

/// Build the dashboard router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/settings",
            get(handlers::settings_page).post(handlers::update_settings),
        )
        // Read API polled by the dashboard page
        .route("/api/advice", get(handlers::advice))
        .route("/api/gamemode", get(handlers::game_mode))
        .route("/api/gametime", get(handlers::game_time))
        .route("/api/next-update", get(handlers::next_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
