use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::advice::markup::{loader_html, WAITING_FOR_LINK};
use crate::api::{GeminiProvider, LlmProvider};
use crate::config::Config;
use crate::error::ModelError;
use crate::models::{GameMode, Snapshot};

/// Settings editable from the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Gemini model identifier
    pub model: String,
    /// Dump prompts and snapshots to disk on every model call
    pub debug: bool,
}

/// Advice session state shared by the poll loop and the dashboard.
///
/// Every field sits behind its own lock and is written independently;
/// readers never need two fields to agree with each other.
pub struct SessionState {
    latest_advice: RwLock<String>,
    game_mode: RwLock<GameMode>,
    advice_history: RwLock<Vec<String>>,
    last_model_call: RwLock<Option<DateTime<Utc>>>,
    last_failed_call: RwLock<Option<DateTime<Utc>>>,
    last_advice_gametime: RwLock<String>,
    last_valid_snapshot: RwLock<Option<Snapshot>>,
    settings: RwLock<Settings>,
    model: RwLock<Option<Arc<dyn LlmProvider>>>,
    api_key: Option<String>,
    api_url: String,
    ai_update_interval: Duration,
}

pub type SharedState = Arc<SessionState>;

impl SessionState {
    /// Build the state and initialize the Gemini client from `config`
    pub fn new(config: &Config) -> SharedState {
        let settings = Settings {
            model: config.gemini_model.clone(),
            debug: config.debug,
        };

        let mut state = Self::with_settings(
            settings,
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.ai_update_interval,
        );
        state.model = RwLock::new(state.build_model(&config.gemini_model));

        Arc::new(state)
    }

    /// Build a state with no model client
    pub fn with_settings(
        settings: Settings,
        api_key: Option<String>,
        api_url: String,
        ai_update_interval: Duration,
    ) -> Self {
        Self {
            latest_advice: RwLock::new(loader_html(WAITING_FOR_LINK)),
            game_mode: RwLock::new(GameMode::Unknown),
            advice_history: RwLock::new(Vec::new()),
            last_model_call: RwLock::new(None),
            last_failed_call: RwLock::new(None),
            last_advice_gametime: RwLock::new("00:00".to_string()),
            last_valid_snapshot: RwLock::new(None),
            settings: RwLock::new(settings),
            model: RwLock::new(None),
            api_key,
            api_url,
            ai_update_interval,
        }
    }

    fn build_model(&self, model: &str) -> Option<Arc<dyn LlmProvider>> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("GEMINI_API_KEY is not set, advice generation disabled");
            return None;
        };

        match GeminiProvider::new(api_key, model, &self.api_url) {
            Ok(provider) => {
                info!("Gemini model initialized: {}", model);
                Some(Arc::new(provider))
            }
            Err(e) => {
                error!("Failed to initialize Gemini model {}: {}", model, e);
                None
            }
        }
    }

    // -- advice ----------------------------------------------------------

    pub async fn latest_advice(&self) -> String {
        self.latest_advice.read().await.clone()
    }

    pub async fn set_latest_advice(&self, advice: impl Into<String>) {
        *self.latest_advice.write().await = advice.into();
    }

    /// The last `n` advice entries, oldest first
    pub async fn advice_history_tail(&self, n: usize) -> Vec<String> {
        let history = self.advice_history.read().await;
        history[history.len().saturating_sub(n)..].to_vec()
    }

    pub async fn advice_count(&self) -> usize {
        self.advice_history.read().await.len()
    }

    /// Publish a successful model answer
    pub async fn record_advice(&self, called_at: DateTime<Utc>, advice: String, game_clock: String) {
        *self.latest_advice.write().await = advice.clone();
        *self.last_model_call.write().await = Some(called_at);
        self.advice_history.write().await.push(advice);
        *self.last_advice_gametime.write().await = game_clock;
    }

    /// Publish a failed model call. The last successful call time is kept.
    pub async fn record_model_failure(&self, called_at: DateTime<Utc>, message: String) {
        *self.latest_advice.write().await = message;
        *self.last_failed_call.write().await = Some(called_at);
    }

    pub async fn last_model_call(&self) -> Option<DateTime<Utc>> {
        *self.last_model_call.read().await
    }

    pub async fn last_failed_call(&self) -> Option<DateTime<Utc>> {
        *self.last_failed_call.read().await
    }

    pub async fn last_advice_gametime(&self) -> String {
        self.last_advice_gametime.read().await.clone()
    }

    // -- connectivity ------------------------------------------------------

    pub async fn game_mode(&self) -> GameMode {
        self.game_mode.read().await.clone()
    }

    pub async fn set_game_mode(&self, mode: GameMode) {
        let mut current = self.game_mode.write().await;
        if *current != mode {
            info!("Game mode: {} -> {}", *current, mode);
            *current = mode;
        }
    }

    pub async fn store_snapshot(&self, snapshot: Snapshot) {
        *self.last_valid_snapshot.write().await = Some(snapshot);
    }

    /// Remove and return the retained snapshot
    pub async fn take_snapshot(&self) -> Option<Snapshot> {
        self.last_valid_snapshot.write().await.take()
    }

    pub async fn has_snapshot(&self) -> bool {
        self.last_valid_snapshot.read().await.is_some()
    }

    // -- settings and model --------------------------------------------------

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub async fn set_debug(&self, debug: bool) {
        self.settings.write().await.debug = debug;
    }

    /// Switch to another Gemini model, keeping the current API key
    pub async fn update_model(&self, model: &str) -> Result<(), ModelError> {
        self.settings.write().await.model = model.to_string();

        let provider = self.build_model(model);
        let ready = provider.is_some();
        *self.model.write().await = provider;

        if ready {
            Ok(())
        } else {
            Err(ModelError::MissingApiKey(model.to_string()))
        }
    }

    /// Install a provider directly
    pub async fn install_model(&self, provider: Option<Arc<dyn LlmProvider>>) {
        *self.model.write().await = provider;
    }

    /// Active model client, if one could be initialized
    pub async fn model(&self) -> Option<Arc<dyn LlmProvider>> {
        self.model.read().await.clone()
    }

    // -- dashboard -------------------------------------------------------------

    /// Countdown until the next advice refresh
    pub async fn next_update_label(&self) -> String {
        self.next_update_label_at(Utc::now()).await
    }

    /// `"--"` when no refresh is coming, `"En cours..."` when one is due,
    /// otherwise the remaining whole seconds (`"42s"`).
    pub async fn next_update_label_at(&self, now: DateTime<Utc>) -> String {
        if self.game_mode().await.is_idle() {
            return "--".to_string();
        }

        let since_last = self
            .last_model_call()
            .await
            .map(|at| elapsed_since(now, at))
            .unwrap_or(Duration::MAX);

        let remaining = self.ai_update_interval.saturating_sub(since_last);
        if remaining.is_zero() {
            return "En cours...".to_string();
        }

        format!("{}s", remaining.as_secs())
    }
}

/// Time from `since` to `now`, zero if `since` is in the future
pub fn elapsed_since(now: DateTime<Utc>, since: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or(Duration::ZERO)
}
