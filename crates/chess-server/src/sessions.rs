//! In-memory registry of running games.
//!
//! Each game lives behind its own async mutex, so two requests against the
//! same game run one after the other while different games proceed
//! independently.

use bot_random::RandomPicker;
use chess_core::{Color, Move};
use chess_engine::{Game, MoveError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use uuid::Uuid;

/// A single game and the computer opponent attached to it.
#[derive(Debug)]
pub struct Session {
    pub game: Game,
    /// Side played by the computer, if any.
    pub ai: Option<Color>,
    picker: RandomPicker,
}

impl Session {
    pub fn new(ai: Option<Color>, picker: RandomPicker) -> Self {
        Session {
            game: Game::new(),
            ai,
            picker,
        }
    }

    /// Plays the computer's move if it is the computer's turn.
    ///
    /// Returns the move played, or `None` when it is a human's turn or the
    /// game is over.
    pub fn ai_reply(&mut self) -> Result<Option<Move>, MoveError> {
        if self.game.is_game_over() || self.ai != Some(self.game.side_to_move()) {
            return Ok(None);
        }
        let played = self.game.play_picker(&mut self.picker)?;
        Ok(played.map(|(m, _)| m))
    }
}

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// All running games, keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns its new id.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Looks up a session by its textual id.
    ///
    /// Any textual form of the UUID is accepted (hyphenated, simple, braced
    /// or urn); the parsed id comes back with the handle so callers can
    /// report it in canonical form. Ids that are not valid UUIDs are treated
    /// as unknown.
    pub fn get(&self, id: &str) -> Option<(Uuid, SessionHandle)> {
        let id = Uuid::parse_str(id).ok()?;
        let handle = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()?;
        Some((id, handle))
    }

    /// Returns the number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
