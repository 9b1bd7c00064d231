use serde_json::Value;

/// One raw `allgamedata` payload from the live client.
///
/// Kept weakly typed: the upstream schema changes between patches and any
/// section may be missing while the client is still loading.
pub type Snapshot = Value;

/// Total lookups over a snapshot tree. Nothing here panics on a missing key
/// or an unexpected type.
pub trait SnapshotExt {
    /// Walk a chain of object keys
    fn at(&self, path: &[&str]) -> Option<&Value>;

    /// String at `path`, or `default` when absent or not a string
    fn str_at<'a>(&'a self, path: &[&str], default: &'a str) -> &'a str;

    /// Number at `path`
    fn f64_at(&self, path: &[&str]) -> Option<f64>;

    /// Array at `path`, empty when absent
    fn array_at(&self, path: &[&str]) -> &[Value];
}

impl SnapshotExt for Value {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.get(*key))
    }

    fn str_at<'a>(&'a self, path: &[&str], default: &'a str) -> &'a str {
        self.at(path).and_then(Value::as_str).unwrap_or(default)
    }

    fn f64_at(&self, path: &[&str]) -> Option<f64> {
        self.at(path).and_then(Value::as_f64)
    }

    fn array_at(&self, path: &[&str]) -> &[Value] {
        self.at(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookups_are_total() {
        let snapshot = json!({
            "gameData": { "gameMode": "CLASSIC", "gameTime": 312.5 },
            "allPlayers": "not a list",
        });

        assert_eq!(snapshot.str_at(&["gameData", "gameMode"], "?"), "CLASSIC");
        assert_eq!(snapshot.f64_at(&["gameData", "gameTime"]), Some(312.5));
        assert_eq!(snapshot.str_at(&["gameData", "gameTime"], "?"), "?");
        assert_eq!(snapshot.str_at(&["activePlayer", "summonerName"], "?"), "?");
        assert!(snapshot.array_at(&["allPlayers"]).is_empty());
        assert!(snapshot.array_at(&["events", "Events"]).is_empty());
        assert!(json!(42).at(&["gameData"]).is_none());
    }
}
