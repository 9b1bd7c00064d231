use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{Snapshot, SnapshotExt};

/// Keys dropped at every nesting level: static descriptions, skins, duplicate
/// name identifiers, full rune pages and ability text the model already knows.
pub const PRUNED_KEYS: &[&str] = &[
    "rawDescription",
    "rawDisplayName",
    "rawChampionName",
    "rawSkinName",
    "skinName",
    "skinID",
    "riotId",
    "riotIdGameName",
    "riotIdTagLine",
    "summonerName",
    "fullRunes",
    "abilities",
];

/// Filter events to the trailing window, then prune verbose fields
pub fn reduce(snapshot: &Snapshot, window: Duration) -> Snapshot {
    prune(&filter_events(snapshot, window))
}

/// Keep only events strictly newer than `gameTime - window`.
///
/// A snapshot without a game clock or an event list (client still loading)
/// is returned as is, and so is one holding an event without a numeric
/// `EventTime`.
pub fn filter_events(snapshot: &Snapshot, window: Duration) -> Snapshot {
    let game_time = snapshot.f64_at(&["gameData", "gameTime"]);
    let events = snapshot.at(&["events", "Events"]).and_then(Value::as_array);

    let (Some(game_time), Some(events)) = (game_time, events) else {
        return snapshot.clone();
    };

    let cutoff = game_time - window.as_secs_f64();
    let mut recent = Vec::with_capacity(events.len());

    for event in events {
        match event.get("EventTime").and_then(Value::as_f64) {
            Some(at) if at > cutoff => recent.push(event.clone()),
            Some(_) => {}
            None => {
                debug!("Event without EventTime, keeping event list unfiltered");
                return snapshot.clone();
            }
        }
    }

    let mut filtered = snapshot.clone();
    if let Some(slot) = filtered.pointer_mut("/events/Events") {
        *slot = Value::Array(recent);
    }
    filtered
}

/// Recursively drop [`PRUNED_KEYS`] and compact `items` and `summonerSpells`.
///
/// Idempotent: pruning an already pruned tree changes nothing.
pub fn prune(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut pruned = Map::with_capacity(map.len());

            for (key, child) in map {
                if PRUNED_KEYS.contains(&key.as_str()) {
                    continue;
                }

                let reduced = match (key.as_str(), child) {
                    ("items", Value::Array(items)) => {
                        Value::Array(items.iter().map(project_item).collect())
                    }
                    ("summonerSpells", Value::Object(spells)) => project_spells(spells),
                    _ => prune(child),
                };

                pruned.insert(key.clone(), reduced);
            }

            Value::Object(pruned)
        }
        Value::Array(items) => Value::Array(items.iter().map(prune).collect()),
        scalar => scalar.clone(),
    }
}

/// `{itemID, displayName, count, slot, ...}` -> `{id, name, count, slot}`.
/// Missing fields are omitted.
fn project_item(item: &Value) -> Value {
    let Value::Object(fields) = item else {
        return prune(item);
    };

    const PROJECTION: [(&str, &[&str]); 4] = [
        ("id", &["itemID", "id"]),
        ("name", &["displayName", "name"]),
        ("count", &["count"]),
        ("slot", &["slot"]),
    ];

    let mut projected = Map::new();
    for (target, sources) in PROJECTION {
        let found = sources
            .iter()
            .filter_map(|source| fields.get(*source))
            .find(|v| !v.is_null());

        if let Some(v) = found {
            projected.insert(target.to_string(), v.clone());
        }
    }

    Value::Object(projected)
}

/// `{slot: {displayName, rawDescription, ...}}` -> `{slot: displayName}`
fn project_spells(spells: &Map<String, Value>) -> Value {
    let projected = spells
        .iter()
        .map(|(slot, spell)| {
            let name = match spell {
                Value::String(name) => name.as_str(),
                other => other.str_at(&["displayName"], "Unknown"),
            };
            (slot.clone(), Value::String(name.to_string()))
        })
        .collect();

    Value::Object(projected)
}
