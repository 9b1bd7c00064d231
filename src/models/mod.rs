pub mod game_mode;
pub mod match_facts;
pub mod snapshot;

pub use game_mode::GameMode;
pub use match_facts::{format_game_clock, GamePhase, MatchFacts};
pub use snapshot::{Snapshot, SnapshotExt};
