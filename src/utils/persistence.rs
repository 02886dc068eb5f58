//! JSON persistence helpers for ~/.dino-runner/ files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const HIGH_SCORE_FILE: &str = "highscore.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "runner.log";

/// Overrides the data directory, mainly for packaged or sandboxed installs.
pub const DATA_DIR_ENV: &str = "DINO_RUNNER_HOME";

/// `$DINO_RUNNER_HOME`, else `~/.dino-runner/`. Created on first use.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .map(|home| home.join(".dino-runner"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?,
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    data_dir().map(|dir| dir.join(filename))
}

/// Parse `path` as JSON. A missing file is silently `T::default()`; a
/// corrupt one is logged and replaced by the default as well.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    let Ok(text) = fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable file");
        T::default()
    })
}

/// Write `data` as pretty JSON through a sibling temp file and a rename, so
/// a crash mid-write never leaves a truncated high score behind.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, text)?;
    fs::rename(&staging, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let val: Vec<String> = load_json_or_default(&dir.path().join("missing.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("scores.json");
        let mut data = BTreeMap::new();
        data.insert("best".to_string(), 812u64);
        save_json(&path, &data).expect("save should succeed");

        let loaded: BTreeMap<String, u64> = load_json_or_default(&path);
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_invalid_json_returns_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").expect("write");
        let val: Vec<u32> = load_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("highscore.json");
        save_json(&path, &vec![1u8, 2]).expect("save");
        save_json(&path, &vec![3u8]).expect("overwrite");
        let names: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("highscore.json")]);
        assert_eq!(load_json_or_default::<Vec<u8>>(&path), vec![3]);
    }

    #[test]
    fn test_save_path_format() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.ends_with("test.json"));
        if std::env::var_os(DATA_DIR_ENV).is_none() {
            assert!(path.to_string_lossy().ends_with(".dino-runner/test.json"));
        }
    }
}
