//! Full game management with history tracking.
//!
//! The [`Game`] struct wraps a [`GameState`] with what a session needs on top
//! of the bare rules:
//! - The ordered list of committed moves
//! - The classification of the current position
//! - The result once the game is over, and a record for persistence

use std::fmt;

use chess_core::{Board, Color, Move};
use thiserror::Error;

use crate::error::{IllegalMove, InvariantViolation, MoveError, SetupError};
use crate::picker::MovePicker;
use crate::rules::{MoveOutcome, RulesEngine};
use crate::state::{GameState, Terminal};
use crate::MoveList;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// Stalemate.
    Draw,
}

impl GameResult {
    /// Returns the result in PGN form ("1-0", "0-1", "1/2-1/2").
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    /// Returns the winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw => None,
        }
    }

    const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished game, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Committed moves in order.
    pub moves: Vec<Move>,
    /// Final result.
    pub result: GameResult,
    /// How the game ended.
    pub termination: Terminal,
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move text is not a coordinate pair such as "e2e4".
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// A chess game with history tracking.
///
/// Unlike [`GameState`], which represents a single position, `Game` keeps
/// the moves that led to it.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current state.
    state: GameState,
    /// Committed moves in order.
    moves: Vec<Move>,
    /// Classification of the current position for the side to move.
    status: MoveOutcome,
    /// Color that made the first move of this game.
    first_mover: Color,
    /// Fullmove number of the starting position.
    start_fullmove: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            state: GameState::new(),
            moves: Vec::new(),
            status: MoveOutcome::Normal,
            first_mover: Color::White,
            start_fullmove: 1,
        }
    }

    /// Creates a game from a custom starting state.
    pub fn from_state(state: GameState) -> Result<Self, InvariantViolation> {
        let status = RulesEngine.classify(state.board(), state.side_to_move())?;
        Ok(Game {
            state,
            moves: Vec::new(),
            status,
            first_mover: state.side_to_move(),
            start_fullmove: 1,
        })
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parsed = chess_core::Fen::parse(fen)?;
        let state = GameState::from_board(parsed.board, parsed.active_color)?;
        let mut game = Self::from_state(state)?;
        game.start_fullmove = parsed.fullmove_number;
        Ok(game)
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    /// Returns the classification of the current position.
    pub fn status(&self) -> MoveOutcome {
        self.status
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        matches!(self.status, MoveOutcome::Check | MoveOutcome::Checkmate)
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> Result<MoveList, InvariantViolation> {
        if self.state.is_terminal() {
            return Ok(MoveList::new());
        }
        RulesEngine.legal_moves(self.state.board(), self.state.side_to_move())
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.state.terminal().map(|terminal| match terminal {
            // The side to move is the one that got mated.
            Terminal::Checkmate => GameResult::win_for(self.state.side_to_move().opposite()),
            Terminal::Stalemate => GameResult::Draw,
        })
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the current full move number.
    pub fn fullmove_number(&self) -> u32 {
        let offset = match self.first_mover {
            Color::White => 0,
            Color::Black => 1,
        };
        let played = (self.moves.len() + offset) / 2;
        self.start_fullmove
            .saturating_add(u32::try_from(played).unwrap_or(u32::MAX))
    }

    /// Makes a move given in internal format.
    pub fn make_move(&mut self, m: Move) -> Result<MoveOutcome, MoveError> {
        let (next, outcome) = RulesEngine.apply_move(&self.state, m.from(), m.to())?;
        self.state = next;
        self.status = outcome;
        self.moves.push(m);
        Ok(outcome)
    }

    /// Makes a move given in UCI coordinate notation (e.g. "e2e4").
    pub fn make_move_uci(&mut self, uci: &str) -> Result<MoveOutcome, GameError> {
        let m = Move::from_uci(uci).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;
        Ok(self.make_move(m)?)
    }

    /// Lets a picker choose and play the next move.
    ///
    /// Returns the move and its outcome, or `None` if the picker declined.
    /// The picked move is applied exactly like any other move.
    pub fn play_picker<P: MovePicker + ?Sized>(
        &mut self,
        picker: &mut P,
    ) -> Result<Option<(Move, MoveOutcome)>, MoveError> {
        if let Some(terminal) = self.state.terminal() {
            return Err(IllegalMove::GameAlreadyTerminal(terminal).into());
        }

        let legal = self.legal_moves()?;
        let Some(m) = picker.pick_move(self.board(), self.side_to_move(), &legal) else {
            return Ok(None);
        };
        let outcome = self.make_move(m)?;
        Ok(Some((m, outcome)))
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.state.to_fen(self.fullmove_number())
    }

    /// Returns the record of a finished game, or `None` while it is running.
    pub fn record(&self) -> Option<GameRecord> {
        let termination = self.state.terminal()?;
        let result = self.result()?;
        Some(GameRecord {
            moves: self.moves.clone(),
            result,
            termination,
        })
    }
}
