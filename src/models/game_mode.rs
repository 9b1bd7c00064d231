use std::fmt;

/// Coarse game mode shown on the dashboard.
///
/// Doubles as the connectivity state of the poll loop: `InGame` carries the
/// raw mode reported by the client (`CLASSIC`, `ARAM`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Client reachable but not serving data yet, or nothing polled so far
    #[default]
    Unknown,
    /// Client unreachable and no match seen
    Offline,
    /// Unexpected polling failure
    Error,
    /// Client went away after a match
    PostGame,
    InGame(String),
}

impl GameMode {
    /// Modes with no upcoming advice refresh
    pub fn is_idle(&self) -> bool {
        matches!(self, GameMode::Offline | GameMode::Error | GameMode::PostGame)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Unknown => write!(f, "Unknown"),
            GameMode::Offline => write!(f, "Offline"),
            GameMode::Error => write!(f, "Error"),
            GameMode::PostGame => write!(f, "PostGame"),
            GameMode::InGame(mode) => write!(f, "{mode}"),
        }
    }
}
