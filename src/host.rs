use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

pub const LOOPBACK: &str = "127.0.0.1";

/// Resolves the host running the game client
pub trait HostResolver: Send + Sync {
    /// Host to poll, or None when this strategy cannot decide
    fn resolve(&self) -> Option<String>;

    fn name(&self) -> &str;
}

/// Always targets the local machine
pub struct Loopback;

impl HostResolver for Loopback {
    fn resolve(&self) -> Option<String> {
        Some(LOOPBACK.to_string())
    }

    fn name(&self) -> &str {
        "loopback"
    }
}

/// A host given explicitly in configuration
pub struct ExplicitHost(pub String);

impl HostResolver for ExplicitHost {
    fn resolve(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn name(&self) -> &str {
        "explicit"
    }
}

/// WSL2 guest reaching the Windows host through the resolver nameserver
pub struct WslNameserver {
    pub resolv_conf: PathBuf,
}

impl HostResolver for WslNameserver {
    fn resolve(&self) -> Option<String> {
        match std::fs::read_to_string(&self.resolv_conf) {
            Ok(contents) => parse_nameserver(&contents),
            Err(e) => {
                warn!("Could not read {}: {}", self.resolv_conf.display(), e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "wsl"
    }
}

/// First `nameserver` address in resolv.conf contents
pub fn parse_nameserver(contents: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("nameserver"), Some(addr)) => Some(addr.to_string()),
                _ => None,
            }
        })
}

/// Host strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    Loopback,
    Wsl,
}

#[derive(Debug, Error)]
#[error("unknown host strategy: {0} (expected loopback or wsl)")]
pub struct UnknownStrategy(String);

impl FromStr for HostStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loopback" | "local" => Ok(HostStrategy::Loopback),
            "wsl" | "wsl2" => Ok(HostStrategy::Wsl),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for HostStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostStrategy::Loopback => write!(f, "loopback"),
            HostStrategy::Wsl => write!(f, "wsl"),
        }
    }
}

/// Pick the resolver for the given configuration values.
///
/// An explicit host wins over the strategy.
pub fn resolver_for(
    explicit: Option<&str>,
    strategy: HostStrategy,
    resolv_conf: PathBuf,
) -> Box<dyn HostResolver> {
    if let Some(host) = explicit {
        return Box::new(ExplicitHost(host.to_string()));
    }

    match strategy {
        HostStrategy::Loopback => Box::new(Loopback),
        HostStrategy::Wsl => Box::new(WslNameserver { resolv_conf }),
    }
}

/// Resolve the target host, falling back to loopback
pub fn resolve_target(resolver: &dyn HostResolver) -> String {
    match resolver.resolve() {
        Some(host) => {
            info!("Targeting live client at {} ({} strategy)", host, resolver.name());
            host
        }
        None => {
            warn!(
                "{} strategy found no host, falling back to {}",
                resolver.name(),
                LOOPBACK
            );
            LOOPBACK.to_string()
        }
    }
}
