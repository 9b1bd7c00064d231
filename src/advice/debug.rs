use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, error};

use crate::models::Snapshot;

/// Write the prompt and the raw snapshot of one model call under `dir`.
///
/// Failures are logged and swallowed.
pub async fn save_artifacts(dir: &Path, timestamp: i64, prompt: &str, snapshot: &Snapshot) {
    match write_artifacts(dir, timestamp, prompt, snapshot).await {
        Ok((prompt_path, data_path)) => debug!(
            "Saved {} and {}",
            prompt_path.display(),
            data_path.display()
        ),
        Err(e) => error!("Could not save debug files to {}: {}", dir.display(), e),
    }
}

async fn write_artifacts(
    dir: &Path,
    timestamp: i64,
    prompt: &str,
    snapshot: &Snapshot,
) -> io::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).await?;

    let prompt_path = dir.join(format!("prompt_{timestamp}.txt"));
    fs::write(&prompt_path, prompt).await?;

    let data_path = dir.join(format!("game_data_{timestamp}.json"));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&data_path, json).await?;

    Ok((prompt_path, data_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_prompt_and_snapshot() {
        let dir = std::env::temp_dir().join(format!("lol-nexus-debug-{}", std::process::id()));
        let snapshot = json!({ "gameData": { "gameTime": 42.0 } });

        save_artifacts(&dir, 1700000000, "prompt text", &snapshot).await;

        let prompt = std::fs::read_to_string(dir.join("prompt_1700000000.txt")).unwrap();
        assert_eq!(prompt, "prompt text");

        let data = std::fs::read_to_string(dir.join("game_data_1700000000.json")).unwrap();
        let parsed: Snapshot = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed, snapshot);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn unwritable_dir_is_swallowed() {
        let file = std::env::temp_dir().join(format!("lol-nexus-debug-file-{}", std::process::id()));
        std::fs::write(&file, "not a directory").unwrap();

        // Parent is a file: create_dir_all fails, nothing panics
        save_artifacts(&file.join("prompt"), 1, "p", &json!({})).await;
        assert!(write_artifacts(&file.join("prompt"), 1, "p", &json!({})).await.is_err());

        std::fs::remove_file(file).ok();
    }
}
