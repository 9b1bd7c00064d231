use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::TelemetryError;
use crate::models::Snapshot;

/// Outcome of a poll that reached the live client
#[derive(Debug, Clone)]
pub enum Fetched {
    /// 200 with a parsed `allgamedata` payload
    Snapshot(Snapshot),
    /// Any other status: the client is up but the match is still loading
    Status(u16),
}

/// Source of live game snapshots
pub trait TelemetrySource: Send + Sync {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<Fetched, TelemetryError>> + Send + '_>>;
}

/// Client for the League of Legends Live Client Data API
pub struct LiveClient {
    client: Client,
    url: String,
}

impl LiveClient {
    /// Create a client for `https://{host}:{port}`.
    ///
    /// The live client serves a self-signed certificate, so certificate
    /// validation is off.
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .context("Failed to build live client HTTP client")?;

        Ok(Self {
            client,
            url: format!("https://{}:{}/liveclientdata/allgamedata", host, port),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_all_game_data(&self) -> Result<Fetched, TelemetryError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Live client answered {}", status);
            return Ok(Fetched::Status(status.as_u16()));
        }

        let snapshot: Snapshot = response
            .json()
            .await
            .map_err(|e| TelemetryError::Decode(e.to_string()))?;

        Ok(Fetched::Snapshot(snapshot))
    }
}

impl TelemetrySource for LiveClient {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<Fetched, TelemetryError>> + Send + '_>> {
        Box::pin(self.fetch_all_game_data())
    }
}

/// Connection failures mean the game is not running; everything else is a
/// transport error.
fn classify(err: reqwest::Error) -> TelemetryError {
    if err.is_connect() {
        TelemetryError::Unreachable(err.to_string())
    } else {
        TelemetryError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let client = LiveClient::new("172.29.160.1", 2999, Duration::from_secs(2)).unwrap();
        assert_eq!(
            client.url(),
            "https://172.29.160.1:2999/liveclientdata/allgamedata"
        );
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = LiveClient::new("127.0.0.1", port, Duration::from_secs(2)).unwrap();
        let result = client.fetch().await;
        assert!(matches!(result, Err(TelemetryError::Unreachable(_))));
    }
}
