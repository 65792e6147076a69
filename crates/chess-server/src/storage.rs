//! Storage for finished games.
//!
//! A game is handed to the store once, when it reaches checkmate or
//! stalemate. [`JsonFileStore`] writes one JSON document per game;
//! [`NoopStore`] discards everything.

use chess_engine::GameRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving a game.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for finished games.
pub trait GameStore: Send + Sync {
    /// Saves a finished game under the given session id.
    fn save(&self, id: &str, record: &GameRecord) -> Result<(), StorageError>;
}

/// On-disk shape of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: String,
    /// "1-0", "0-1" or "1/2-1/2".
    pub result: String,
    /// "checkmate" or "stalemate".
    pub termination: String,
    /// Moves in UCI notation.
    pub moves: Vec<String>,
    pub finished_at: DateTime<Utc>,
}

impl StoredGame {
    /// Builds the stored form of a record, stamped with the current time.
    pub fn new(id: &str, record: &GameRecord) -> Self {
        StoredGame {
            id: id.to_string(),
            result: record.result.as_str().to_string(),
            termination: record.termination.to_string(),
            moves: record.moves.iter().map(|m| m.to_uci()).collect(),
            finished_at: Utc::now(),
        }
    }
}

/// Writes each finished game to `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// The directory is created on the first save if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        JsonFileStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the file a game with the given id is written to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl GameStore for JsonFileStore {
    fn save(&self, id: &str, record: &GameRecord) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&StoredGame::new(id, record))?;
        std::fs::write(self.path_for(id), json)?;
        Ok(())
    }
}

/// Store used when persistence is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl GameStore for NoopStore {
    fn save(&self, _id: &str, _record: &GameRecord) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::{Game, GameResult, Terminal};

    fn fools_mate() -> GameRecord {
        let mut game = Game::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.make_move_uci(uci).unwrap();
        }
        game.record().unwrap()
    }

    #[test]
    fn test_stored_game_fields() {
        let stored = StoredGame::new("abc", &fools_mate());
        assert_eq!(stored.id, "abc");
        assert_eq!(stored.result, "0-1");
        assert_eq!(stored.termination, "checkmate");
        assert_eq!(stored.moves, vec!["f2f3", "e7e5", "g2g4", "d8h4"]);
    }

    #[test]
    fn test_json_file_store_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("games"));

        store.save("game-1", &fools_mate()).unwrap();

        let content = std::fs::read_to_string(store.path_for("game-1")).unwrap();
        let stored: StoredGame = serde_json::from_str(&content).unwrap();
        assert_eq!(stored.id, "game-1");
        assert_eq!(stored.result, GameResult::BlackWins.as_str());
        assert_eq!(stored.termination, Terminal::Checkmate.to_string());
        assert_eq!(stored.moves.len(), 4);

        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        let finished_at = raw["finished_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(finished_at).is_ok());
    }

    #[test]
    fn test_json_file_store_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();

        let store = JsonFileStore::new(&blocker);
        let result = store.save("game-1", &fools_mate());
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn test_noop_store_accepts_everything() {
        assert!(NoopStore.save("x", &fools_mate()).is_ok());
    }
}
