use std::time::Duration;

use thiserror::Error;

/// Failure reaching or reading the live client endpoint
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Connection refused or unreachable host: the game is not running
    #[error("live client unreachable: {0}")]
    Unreachable(String),

    #[error("live client request failed: {0}")]
    Transport(String),

    #[error("invalid live client payload: {0}")]
    Decode(String),
}

/// Failure calling the language model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key configured for {0}")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("{provider} returned {status}: {body}")]
    Provider {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("unreadable response: {0}")]
    Parse(String),

    #[error("empty response")]
    EmptyResponse,

    #[error("no response after {0:?}")]
    Timeout(Duration),
}
