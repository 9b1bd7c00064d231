use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::advice::markup::{loader_html, WAITING_FOR_API, WAITING_FOR_MATCH};
use crate::advice::AdviceGenerator;
use crate::api::{Fetched, TelemetrySource};
use crate::config::Config;
use crate::error::TelemetryError;
use crate::models::{GameMode, Snapshot};
use crate::snapshot::{interpret, reduce};
use crate::state::{elapsed_since, SharedState};

/// How long before the next advice is due the loop switches back to fast
/// polling
const WAKE_AHEAD: Duration = Duration::from_secs(10);

/// Worker that polls the live client and drives advice generation
pub struct PollerWorker<S: TelemetrySource> {
    source: S,
    state: SharedState,
    generator: AdviceGenerator,
    event_window: Duration,
    fast_interval: Duration,
    slow_interval: Duration,
}

impl<S: TelemetrySource> PollerWorker<S> {
    /// Create a new poller worker
    pub fn new(source: S, state: SharedState, generator: AdviceGenerator, config: &Config) -> Self {
        Self {
            source,
            state,
            generator,
            event_window: config.event_window,
            fast_interval: config.poll_interval_fast,
            slow_interval: config.poll_interval_slow,
        }
    }

    /// Run the worker loop. Never returns.
    pub async fn run(&self) {
        info!(
            "Live client poller started (fast: {:?}, slow: {:?})",
            self.fast_interval, self.slow_interval
        );

        loop {
            let delay = self.poll_once().await;
            time::sleep(delay).await;
        }
    }

    /// Perform a single poll cycle and return the delay before the next one
    pub async fn poll_once(&self) -> Duration {
        match self.source.fetch().await {
            Ok(Fetched::Snapshot(raw)) => self.on_snapshot(raw).await,
            Ok(Fetched::Status(status)) => self.on_not_ready(status).await,
            Err(TelemetryError::Unreachable(reason)) => self.on_unreachable(&reason).await,
            Err(e) => self.on_error(e).await,
        }

        self.next_delay_at(Utc::now()).await
    }

    async fn on_snapshot(&self, raw: Snapshot) {
        let reduced = reduce(&raw, self.event_window);
        let facts = interpret(&raw);

        debug!(
            "Snapshot: {} as {} ({}), {:.0}s",
            facts.game_mode, facts.champion, facts.position, facts.game_time
        );

        self.state
            .set_game_mode(GameMode::InGame(facts.game_mode.clone()))
            .await;
        self.state.store_snapshot(raw.clone()).await;

        self.generator
            .maybe_generate_advice(&reduced, &raw, &facts)
            .await;
    }

    async fn on_not_ready(&self, status: u16) {
        warn!("Live client returned status {}", status);
        self.state.set_game_mode(GameMode::Unknown).await;
        self.state
            .set_latest_advice(loader_html(WAITING_FOR_API))
            .await;
    }

    async fn on_unreachable(&self, reason: &str) {
        debug!("Live client unreachable: {}", reason);

        if let Some(last) = self.state.take_snapshot().await {
            self.state.set_game_mode(GameMode::PostGame).await;
            self.generator.generate_post_game_report(&last).await;
            return;
        }

        let previous = self.state.game_mode().await;
        self.state.set_game_mode(GameMode::Offline).await;

        // The post-game report stays readable while waiting for the next match
        if previous != GameMode::PostGame {
            self.state
                .set_latest_advice(loader_html(WAITING_FOR_MATCH))
                .await;
        }
    }

    async fn on_error(&self, err: TelemetryError) {
        error!("Polling error: {}", err);
        self.state.set_game_mode(GameMode::Error).await;
        self.state
            .set_latest_advice(format!("❌ Erreur technique : {err}"))
            .await;
    }

    /// Slow down right after a model call, speed up again shortly before the
    /// next one is due
    pub async fn next_delay_at(&self, now: DateTime<Utc>) -> Duration {
        if self.state.model().await.is_none() {
            return self.fast_interval;
        }

        let quiet_period = self.generator.interval().saturating_sub(WAKE_AHEAD);
        match self.state.last_model_call().await {
            Some(at) if elapsed_since(now, at) < quiet_period => self.slow_interval,
            _ => self.fast_interval,
        }
    }
}
