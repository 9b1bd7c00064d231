use std::env;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lol_nexus::advice::AdviceGenerator;
use lol_nexus::api::LiveClient;
use lol_nexus::config::Config;
use lol_nexus::host;
use lol_nexus::state::SessionState;
use lol_nexus::web::create_router;
use lol_nexus::workers::PollerWorker;

/// Live client request timeout
const LIVE_CLIENT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lol_nexus=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting lol-nexus");

    // Load configuration
    let mut config = Config::from_env()?;
    if env::args().any(|a| a == "--debug") {
        config.debug = true;
    }
    if config.debug {
        info!(
            "Debug mode enabled: prompts will be saved to {}",
            config.debug_dir.display()
        );
    }
    info!("Configuration loaded");

    // Shared state and model client
    let state = SessionState::new(&config);

    // Resolve the live client host once
    let resolver = host::resolver_for(
        config.windows_host.as_deref(),
        config.host_strategy,
        config.resolv_conf.clone(),
    );
    let target = host::resolve_target(resolver.as_ref());
    let live_client = LiveClient::new(&target, config.lol_api_port, LIVE_CLIENT_TIMEOUT)?;
    info!("Polling {}", live_client.url());

    let generator = AdviceGenerator::new(state.clone(), &config);
    let poller = PollerWorker::new(live_client, state.clone(), generator, &config);

    let poller_handle = tokio::spawn(async move {
        poller.run().await;
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Dashboard listening on http://{}", config.bind_addr);

    let server_handle = tokio::spawn(async move { axum::serve(listener, create_router(state)).await });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = poller_handle => {
            error!("Poller exited unexpectedly: {:?}", result);
        }
        result = server_handle => {
            error!("Dashboard server exited unexpectedly: {:?}", result);
        }
    }

    info!("Shutting down lol-nexus");
    Ok(())
}
