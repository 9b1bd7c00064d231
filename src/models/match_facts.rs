use serde::Serialize;

/// Game clock below which the early game plan is produced
pub const EARLY_GAME_SECONDS: f64 = 120.0;

pub const UNKNOWN_CHAMPION: &str = "Unknown";
pub const UNKNOWN_POSITION: &str = "UNKNOWN";
pub const UNKNOWN_OPPONENT: &str = "Inconnu";

/// Which advice template applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Early,
    Standard,
}

impl GamePhase {
    pub fn from_game_time(seconds: f64) -> Self {
        if seconds < EARLY_GAME_SECONDS {
            GamePhase::Early
        } else {
            GamePhase::Standard
        }
    }
}

/// Session facts derived from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFacts {
    /// Champion played by the local player
    pub champion: String,

    /// Lane position of the local player (`TOP`, `JUNGLE`, ...)
    pub position: String,

    /// Champions on the local player's team, in roster order
    pub own_team: Vec<String>,

    /// Champions on the other team, in roster order
    pub enemy_team: Vec<String>,

    /// Enemy champion in the same position
    pub lane_opponent: String,

    /// Elapsed game clock in seconds
    pub game_time: f64,

    /// Raw game mode (`CLASSIC`, `ARAM`, ...)
    pub game_mode: String,

    pub phase: GamePhase,
}

impl Default for MatchFacts {
    fn default() -> Self {
        Self {
            champion: UNKNOWN_CHAMPION.to_string(),
            position: UNKNOWN_POSITION.to_string(),
            own_team: Vec::new(),
            enemy_team: Vec::new(),
            lane_opponent: UNKNOWN_OPPONENT.to_string(),
            game_time: 0.0,
            game_mode: "UNKNOWN".to_string(),
            phase: GamePhase::Early,
        }
    }
}

/// Format a game clock as `MM:SS`
pub fn format_game_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
