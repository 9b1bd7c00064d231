use axum::extract::{Form, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::{info, warn};

use super::pages;
use crate::state::SharedState;

/// Form posted by the settings page
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub model: Option<String>,
    /// Checkbox: `on` when ticked, absent otherwise
    pub debug: Option<String>,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX)
}

/// GET /settings
pub async fn settings_page(State(state): State<SharedState>) -> Html<String> {
    let settings = state.settings().await;
    Html(pages::settings(&settings.model, settings.debug))
}

/// POST /settings
pub async fn update_settings(
    State(state): State<SharedState>,
    Form(form): Form<SettingsForm>,
) -> Html<&'static str> {
    let debug_on = form.debug.as_deref() == Some("on");
    let model = form
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    info!("Updating settings: model={:?}, debug={}", model, debug_on);
    state.set_debug(debug_on).await;

    if let Some(model) = model {
        if model != state.settings().await.model {
            if let Err(e) = state.update_model(model).await {
                warn!("Model switched to {} but not usable: {}", model, e);
            }
        }
    }

    Html(pages::SETTINGS_SAVED)
}

/// GET /api/advice
pub async fn advice(State(state): State<SharedState>) -> Html<String> {
    Html(state.latest_advice().await)
}

/// GET /api/gamemode
pub async fn game_mode(State(state): State<SharedState>) -> String {
    state.game_mode().await.to_string()
}

/// GET /api/gametime
pub async fn game_time(State(state): State<SharedState>) -> String {
    state.last_advice_gametime().await
}

/// GET /api/next-update
pub async fn next_update(State(state): State<SharedState>) -> String {
    state.next_update_label().await
}
