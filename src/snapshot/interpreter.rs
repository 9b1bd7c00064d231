use serde_json::Value;

use crate::models::match_facts::UNKNOWN_CHAMPION;
use crate::models::{GamePhase, MatchFacts, Snapshot, SnapshotExt};

/// Derive match facts from a raw snapshot.
///
/// Total over any input: missing sections yield the sentinel values of
/// [`MatchFacts::default`].
pub fn interpret(snapshot: &Snapshot) -> MatchFacts {
    let game_time = snapshot
        .f64_at(&["gameData", "gameTime"])
        .unwrap_or(0.0);

    let mut facts = MatchFacts {
        game_time,
        game_mode: snapshot
            .str_at(&["gameData", "gameMode"], "UNKNOWN")
            .to_string(),
        phase: GamePhase::from_game_time(game_time),
        ..MatchFacts::default()
    };

    let players = snapshot.array_at(&["allPlayers"]);
    let active = snapshot.at(&["activePlayer"]);

    // First pass: locate the local player
    let me = active.and_then(|me| players.iter().position(|p| is_same_player(me, p)));
    let own_team = me.map(|index| {
        let local = &players[index];
        facts.champion = local.str_at(&["championName"], UNKNOWN_CHAMPION).to_string();
        facts.position = local.str_at(&["position"], "").to_string();
        local.str_at(&["team"], "")
    });

    // Second pass: split rosters and find the lane opponent.
    // A missing team compares equal to another missing team.
    let mut opponent = None;
    for (index, player) in players.iter().enumerate() {
        let champion = player.str_at(&["championName"], UNKNOWN_CHAMPION).to_string();

        if Some(index) == me || Some(player.str_at(&["team"], "")) == own_team {
            facts.own_team.push(champion);
            continue;
        }

        let position = player.str_at(&["position"], "");
        if opponent.is_none() && !position.is_empty() && position == facts.position {
            opponent = Some(champion.clone());
        }
        facts.enemy_team.push(champion);
    }

    if let Some(opponent) = opponent {
        facts.lane_opponent = opponent;
    }

    facts
}

/// Match the active player against a roster entry by summoner name, or by
/// Riot ID when both sides carry one.
fn is_same_player(active: &Value, player: &Value) -> bool {
    ["summonerName", "riotId"].iter().any(|key| {
        let mine = active.str_at(&[*key], "");
        !mine.is_empty() && mine == player.str_at(&[*key], "")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::match_facts::{UNKNOWN_OPPONENT, UNKNOWN_POSITION};

    fn player(name: &str, champion: &str, team: &str, position: &str) -> Value {
        json!({
            "summonerName": name,
            "championName": champion,
            "team": team,
            "position": position,
        })
    }

    fn ranked_game(game_time: f64) -> Snapshot {
        json!({
            "activePlayer": { "summonerName": "Bjergsen" },
            "gameData": { "gameMode": "CLASSIC", "gameTime": game_time },
            "allPlayers": [
                player("Zeus", "Jayce", "ORDER", "TOP"),
                player("Bjergsen", "Orianna", "ORDER", "MIDDLE"),
                player("Oner", "Lee Sin", "ORDER", "JUNGLE"),
                player("Chovy", "Azir", "CHAOS", "MIDDLE"),
                player("Kiin", "K'Sante", "CHAOS", "TOP"),
                player("Canyon", "Vi", "CHAOS", "JUNGLE"),
            ]
        })
    }

    #[test]
    fn test_interpret_ranked_game() {
        let facts = interpret(&ranked_game(845.0));

        assert_eq!(facts.champion, "Orianna");
        assert_eq!(facts.position, "MIDDLE");
        assert_eq!(facts.own_team, vec!["Jayce", "Orianna", "Lee Sin"]);
        assert_eq!(facts.enemy_team, vec!["Azir", "K'Sante", "Vi"]);
        assert_eq!(facts.lane_opponent, "Azir");
        assert_eq!(facts.game_mode, "CLASSIC");
        assert_eq!(facts.game_time, 845.0);
        assert_eq!(facts.phase, GamePhase::Standard);
    }

    #[test]
    fn test_interpret_missing_players() {
        let facts = interpret(&json!({ "gameData": { "gameTime": 12.0 } }));

        assert_eq!(facts.champion, "Unknown");
        assert_eq!(facts.position, UNKNOWN_POSITION);
        assert!(facts.own_team.is_empty());
        assert!(facts.enemy_team.is_empty());
        assert_eq!(facts.lane_opponent, UNKNOWN_OPPONENT);
        assert_eq!(facts.phase, GamePhase::Early);
    }

    #[test]
    fn test_interpret_garbage() {
        for snapshot in [json!(null), json!([1, 2]), json!({ "allPlayers": 3 })] {
            let facts = interpret(&snapshot);
            assert_eq!(facts, MatchFacts::default());
        }
    }

    #[test]
    fn test_unmatched_active_player_has_no_team() {
        let mut snapshot = ranked_game(300.0);
        snapshot["activePlayer"] = json!({ "summonerName": "Spectator" });

        let facts = interpret(&snapshot);
        assert_eq!(facts.champion, "Unknown");
        assert_eq!(facts.position, UNKNOWN_POSITION);
        assert!(facts.own_team.is_empty());
        assert_eq!(facts.enemy_team.len(), 6);
        assert_eq!(facts.lane_opponent, UNKNOWN_OPPONENT);
    }

    #[test]
    fn test_teamless_active_player_is_not_own_opponent() {
        let snapshot = json!({
            "activePlayer": { "summonerName": "me" },
            "gameData": { "gameMode": "CLASSIC", "gameTime": 400.0 },
            "allPlayers": [
                { "summonerName": "me", "championName": "Garen", "position": "TOP" },
                { "summonerName": "ally", "championName": "Lux", "position": "MIDDLE" },
                player("foe", "Darius", "CHAOS", "TOP"),
            ]
        });

        let facts = interpret(&snapshot);
        assert_eq!(facts.champion, "Garen");
        assert_eq!(facts.own_team, vec!["Garen", "Lux"]);
        assert_eq!(facts.enemy_team, vec!["Darius"]);
        assert_eq!(facts.lane_opponent, "Darius");
    }

    #[test]
    fn test_active_player_never_faces_itself() {
        let snapshot = json!({
            "activePlayer": { "summonerName": "me" },
            "gameData": { "gameMode": "CLASSIC", "gameTime": 400.0 },
            "allPlayers": [
                { "summonerName": "me", "championName": "Garen", "position": "TOP" },
                player("foe", "Darius", "CHAOS", "JUNGLE"),
            ]
        });

        let facts = interpret(&snapshot);
        assert_eq!(facts.own_team, vec!["Garen"]);
        assert_eq!(facts.enemy_team, vec!["Darius"]);
        assert_eq!(facts.lane_opponent, UNKNOWN_OPPONENT);
    }

    #[test]
    fn test_no_opponent_without_position() {
        // ARAM: positions are empty strings
        let snapshot = json!({
            "activePlayer": { "summonerName": "me" },
            "gameData": { "gameMode": "ARAM", "gameTime": 30.0 },
            "allPlayers": [
                player("me", "Lux", "ORDER", ""),
                player("you", "Zed", "CHAOS", ""),
            ]
        });

        let facts = interpret(&snapshot);
        assert_eq!(facts.own_team, vec!["Lux"]);
        assert_eq!(facts.enemy_team, vec!["Zed"]);
        assert_eq!(facts.lane_opponent, UNKNOWN_OPPONENT);
    }

    #[test]
    fn test_first_opponent_wins_tie() {
        let snapshot = json!({
            "activePlayer": { "summonerName": "me" },
            "allPlayers": [
                player("me", "Garen", "ORDER", "TOP"),
                player("a", "Darius", "CHAOS", "TOP"),
                player("b", "Teemo", "CHAOS", "TOP"),
            ]
        });

        assert_eq!(interpret(&snapshot).lane_opponent, "Darius");
    }

    #[test]
    fn test_match_by_riot_id() {
        let snapshot = json!({
            "activePlayer": { "riotId": "Caps#EUW", "summonerName": "" },
            "allPlayers": [
                { "riotId": "Caps#EUW", "championName": "LeBlanc", "team": "CHAOS", "position": "MIDDLE" },
                { "riotId": "Faker#KR1", "championName": "Ahri", "team": "ORDER", "position": "MIDDLE" },
            ]
        });

        let facts = interpret(&snapshot);
        assert_eq!(facts.champion, "LeBlanc");
        assert_eq!(facts.lane_opponent, "Ahri");
    }

    #[test]
    fn test_phase_follows_game_clock() {
        assert_eq!(interpret(&ranked_game(119.0)).phase, GamePhase::Early);
        assert_eq!(interpret(&ranked_game(120.0)).phase, GamePhase::Standard);
    }
}
