use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::host::HostStrategy;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (model client stays uninitialized without it)
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier
    pub gemini_model: String,

    /// Base URL of the Gemini models endpoint
    pub gemini_api_url: String,

    /// Explicit live client host, overrides the host strategy
    pub windows_host: Option<String>,

    /// How to find the live client host when none is given
    pub host_strategy: HostStrategy,

    /// Resolver file read by the WSL strategy
    pub resolv_conf: PathBuf,

    /// Live client API port
    pub lol_api_port: u16,

    /// Poll delay when an advice call is imminent or the client is down
    pub poll_interval_fast: Duration,

    /// Poll delay right after an advice call
    pub poll_interval_slow: Duration,

    /// Minimum spacing between two model calls
    pub ai_update_interval: Duration,

    /// Trailing event window kept in reduced snapshots
    pub event_window: Duration,

    /// Client-side model call timeout
    pub ai_timeout: Duration,

    /// Delay before retrying after a failed model call
    pub ai_failure_backoff: Duration,

    /// Where debug prompts and snapshots are written
    pub debug_dir: PathBuf,

    /// Dashboard listen address
    pub bind_addr: String,

    /// Initial debug flag
    pub debug: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),

            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),

            windows_host: env::var("WINDOWS_HOST").ok().filter(|h| !h.is_empty()),

            host_strategy: parse_var("HOST_STRATEGY", "loopback")?,

            resolv_conf: env::var("RESOLV_CONF")
                .unwrap_or_else(|_| "/etc/resolv.conf".to_string())
                .into(),

            lol_api_port: parse_var("LOL_API_PORT", "2999")?,

            poll_interval_fast: Duration::from_secs(parse_var("POLL_INTERVAL_FAST", "2")?),

            poll_interval_slow: Duration::from_secs(parse_var("POLL_INTERVAL_SLOW", "10")?),

            ai_update_interval: Duration::from_secs(parse_var("AI_UPDATE_INTERVAL", "120")?),

            event_window: Duration::from_secs(parse_var("EVENT_WINDOW", "120")?),

            ai_timeout: Duration::from_secs(parse_var("AI_TIMEOUT", "60")?),

            ai_failure_backoff: Duration::from_secs(parse_var("AI_FAILURE_BACKOFF", "30")?),

            debug_dir: env::var("DEBUG_DIR")
                .unwrap_or_else(|_| "prompt".to_string())
                .into(),

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),

            debug: parse_var("NEXUS_DEBUG", "false")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            windows_host: None,
            host_strategy: HostStrategy::Loopback,
            resolv_conf: PathBuf::from("/etc/resolv.conf"),
            lol_api_port: 2999,
            poll_interval_fast: Duration::from_secs(2),
            poll_interval_slow: Duration::from_secs(10),
            ai_update_interval: Duration::from_secs(120),
            event_window: Duration::from_secs(120),
            ai_timeout: Duration::from_secs(60),
            ai_failure_backoff: Duration::from_secs(30),
            debug_dir: PathBuf::from("prompt"),
            bind_addr: "0.0.0.0:5000".to_string(),
            debug: false,
        }
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{name} has an invalid value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_live_client_constants() {
        let config = Config::default();
        assert_eq!(config.lol_api_port, 2999);
        assert_eq!(config.poll_interval_fast, Duration::from_secs(2));
        assert_eq!(config.poll_interval_slow, Duration::from_secs(10));
        assert_eq!(config.ai_update_interval, Duration::from_secs(120));
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn parse_var_falls_back_to_default() {
        let port: u16 = parse_var("LOL_NEXUS_TEST_UNSET_PORT", "2999").unwrap();
        assert_eq!(port, 2999);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        let result: Result<u64> = parse_var("LOL_NEXUS_TEST_UNSET_INTERVAL", "soon");
        assert!(result.is_err());
    }
}
