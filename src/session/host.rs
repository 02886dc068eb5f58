//! High score persistence collaborators.

use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Receives high score changes. Values are raw distances, rounded up.
pub trait HighScoreHost {
    fn report_high_score(&mut self, value: u64);
    fn reset_high_score(&mut self);
}

/// Accepts and forgets everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighScoreHost;

impl HighScoreHost for NoHighScoreHost {
    fn report_high_score(&mut self, _value: u64) {}
    fn reset_high_score(&mut self) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRecord {
    pub value: u64,
    pub reports: u32,
    pub resets: u32,
}

/// In-memory host; clones share one record so callers can inspect it
/// after handing a clone to the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    record: Rc<RefCell<MemoryRecord>>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> MemoryRecord {
        self.record.borrow().clone()
    }
}

impl HighScoreHost for MemoryHighScore {
    fn report_high_score(&mut self, value: u64) {
        let mut record = self.record.borrow_mut();
        record.value = value;
        record.reports += 1;
    }

    fn reset_high_score(&mut self) {
        let mut record = self.record.borrow_mut();
        record.value = 0;
        record.resets += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreFile {
    pub high_score: u64,
}

/// Stores the high score as JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the default data directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(persistence::save_path(persistence::HIGH_SCORE_FILE)?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Stored value, or 0 when nothing has been saved yet.
    pub fn load(&self) -> u64 {
        persistence::load_json_or_default::<HighScoreFile>(&self.path).high_score
    }

    fn write(&self, high_score: u64) -> io::Result<()> {
        persistence::save_json(&self.path, &HighScoreFile { high_score })
    }
}

impl HighScoreHost for JsonHighScoreStore {
    fn report_high_score(&mut self, value: u64) {
        match self.write(value) {
            Ok(()) => tracing::info!(value, path = %self.path.display(), "high score saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save high score"),
        }
    }

    fn reset_high_score(&mut self) {
        match self.write(0) {
            Ok(()) => tracing::info!("high score reset"),
            Err(e) => tracing::warn!(error = %e, "failed to reset high score"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_host_shares_record() {
        let host = MemoryHighScore::new();
        let mut handed_out = host.clone();
        handed_out.report_high_score(1200);
        handed_out.reset_high_score();
        assert_eq!(
            host.record(),
            MemoryRecord {
                value: 0,
                reports: 1,
                resets: 1
            }
        );
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonHighScoreStore::new(dir.path().join("highscore.json"));
        assert_eq!(store.load(), 0);
        store.report_high_score(4321);
        assert_eq!(store.load(), 4321);
        store.reset_high_score();
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_json_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("highscore.json");
        std::fs::write(&path, "not json").expect("write");
        assert_eq!(JsonHighScoreStore::new(path).load(), 0);
    }
}
