use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time;
use tracing::{error, info, warn};

use crate::api::LlmProvider;
use crate::config::Config;
use crate::error::ModelError;
use crate::models::{format_game_clock, GamePhase, MatchFacts, Snapshot};
use crate::snapshot::prune;
use crate::state::{elapsed_since, SharedState};

use super::debug;
use super::markup::{
    clean_advice, loader_html, EARLY_GAME_LOADING, POST_GAME_LOADING, TACTICAL_LOADING,
};
use super::prompts;

/// Previous advice entries fed back to the model as context
pub const HISTORY_CONTEXT: usize = 3;

/// Turns match data into advice, at most once per update interval
pub struct AdviceGenerator {
    state: SharedState,
    interval: Duration,
    failure_backoff: Duration,
    timeout: Duration,
    debug_dir: PathBuf,
}

impl AdviceGenerator {
    pub fn new(state: SharedState, config: &Config) -> Self {
        Self {
            state,
            interval: config.ai_update_interval,
            failure_backoff: config.ai_failure_backoff,
            timeout: config.ai_timeout,
            debug_dir: config.debug_dir.clone(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Generate advice if the update interval has elapsed.
    ///
    /// Returns whether the model was called.
    pub async fn maybe_generate_advice(
        &self,
        reduced: &Snapshot,
        raw: &Snapshot,
        facts: &MatchFacts,
    ) -> bool {
        self.maybe_generate_advice_at(Utc::now(), reduced, raw, facts)
            .await
    }

    pub async fn maybe_generate_advice_at(
        &self,
        now: DateTime<Utc>,
        reduced: &Snapshot,
        raw: &Snapshot,
        facts: &MatchFacts,
    ) -> bool {
        let Some(model) = self.state.model().await else {
            return false;
        };

        if !self.is_due(now).await {
            return false;
        }

        let (loading, prompt) = match facts.phase {
            GamePhase::Early => {
                info!("Generating early game plan ({})", facts.champion);
                (EARLY_GAME_LOADING, prompts::early_game_prompt(facts))
            }
            GamePhase::Standard => {
                info!(
                    "Generating tactical advice at {}",
                    format_game_clock(facts.game_time)
                );
                let history = self.state.advice_history_tail(HISTORY_CONTEXT).await;
                (
                    TACTICAL_LOADING,
                    prompts::tactical_prompt(facts, &history, reduced),
                )
            }
        };

        self.state.set_latest_advice(loader_html(loading)).await;

        if self.state.settings().await.debug {
            debug::save_artifacts(&self.debug_dir, now.timestamp(), &prompt, raw).await;
        }

        match self.call_model(model.as_ref(), &prompt).await {
            Ok(text) => {
                info!("Advice received from {}", model.name());
                self.state
                    .record_advice(now, clean_advice(&text), format_game_clock(facts.game_time))
                    .await;
            }
            Err(e) => {
                error!("Gemini error: {}", e);
                self.state
                    .record_model_failure(now, format!("Erreur IA: {e}"))
                    .await;
            }
        }

        true
    }

    /// One-shot end-of-match report, not subject to the update interval.
    ///
    /// `last` is the last raw snapshot of the match. The prompt gets it
    /// pruned with the full event history; debug artifacts get it as is.
    ///
    /// Returns whether the model was called.
    pub async fn generate_post_game_report(&self, last: &Snapshot) -> bool {
        let Some(model) = self.state.model().await else {
            warn!("Game ended but no model is configured, skipping post-game report");
            return false;
        };

        info!("Game ended, generating post-game report");
        self.state
            .set_latest_advice(loader_html(POST_GAME_LOADING))
            .await;

        let prompt = prompts::post_game_prompt(&prune(last));

        if self.state.settings().await.debug {
            debug::save_artifacts(&self.debug_dir, Utc::now().timestamp(), &prompt, last).await;
        }

        match self.call_model(model.as_ref(), &prompt).await {
            Ok(text) => {
                info!("Post-game report received from {}", model.name());
                self.state.set_latest_advice(clean_advice(&text)).await;
            }
            Err(e) => {
                error!("Post-game report failed: {}", e);
                self.state
                    .set_latest_advice(format!("Erreur Analyse Fin de Partie: {e}"))
                    .await;
            }
        }

        true
    }

    /// Interval elapsed since the last success, and the failure backoff since
    /// the last failure
    async fn is_due(&self, now: DateTime<Utc>) -> bool {
        let since_success = self
            .state
            .last_model_call()
            .await
            .map(|at| elapsed_since(now, at));
        if since_success.is_some_and(|elapsed| elapsed < self.interval) {
            return false;
        }

        let since_failure = self
            .state
            .last_failed_call()
            .await
            .map(|at| elapsed_since(now, at));
        !since_failure.is_some_and(|elapsed| elapsed < self.failure_backoff)
    }

    async fn call_model(&self, model: &dyn LlmProvider, prompt: &str) -> Result<String, ModelError> {
        match time::timeout(self.timeout, model.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ModelError::Timeout(self.timeout)),
        }
    }
}
