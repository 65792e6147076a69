//! Chess rules engine.
//!
//! This crate provides:
//! - [`RulesEngine`] - stateless move validation, check detection, and
//!   checkmate/stalemate classification
//! - [`GameState`] - an immutable position value with side to move and phase
//! - [`Game`] - game management with history tracking and results
//! - [`MovePicker`] - the seam automated players plug into
//!
//! # Rules covered
//!
//! Piece movement for all six kinds, path blocking for sliders, captures,
//! and the ban on leaving one's own king in check. Castling, en passant,
//! promotion, and the draw rules other than stalemate are not part of the
//! rule set; a pawn that reaches the last rank stays a pawn.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{Game, MoveOutcome, RulesEngine};
//!
//! // Using the engine directly (stateless)
//! let state = chess_engine::new_game();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let (next, outcome) = chess_engine::apply_move(&state, e2, e4).unwrap();
//! assert_eq!(outcome, MoveOutcome::Normal);
//! assert_eq!(RulesEngine.legal_moves(next.board(), next.side_to_move()).unwrap().len(), 20);
//!
//! // Using Game for full game management
//! let mut game = Game::new();
//! game.make_move_uci("e2e4").unwrap();
//! game.make_move_uci("e7e5").unwrap();
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

mod error;
mod game;
pub mod movegen;
mod picker;
pub mod rules;
mod state;

use chess_core::Square;

pub use error::{IllegalMove, InvariantViolation, MoveError, SetupError};
pub use game::{Game, GameError, GameRecord, GameResult};
pub use movegen::MoveList;
pub use picker::MovePicker;
pub use rules::{MoveOutcome, RulesEngine};
pub use state::{GameState, Phase, Terminal};

/// Returns the standard starting position with White to move.
pub fn new_game() -> GameState {
    RulesEngine.initial_state()
}

/// Applies a move to `state` with the standard rules.
///
/// Shorthand for [`RulesEngine::apply_move`].
pub fn apply_move(
    state: &GameState,
    from: Square,
    to: Square,
) -> Result<(GameState, MoveOutcome), MoveError> {
    RulesEngine.apply_move(state, from, to)
}
