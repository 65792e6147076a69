//! Error types for the rules engine.

use chess_core::{Color, FenError, Piece, Square};
use thiserror::Error;

use crate::state::Terminal;

/// A move rejected by the rules.
///
/// Every variant is recoverable: the state the move was tried against is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece on {0}")]
    EmptyOrigin(Square),

    #[error("piece on {square} belongs to {found}, but it is {expected}'s turn")]
    WrongSideToMove {
        square: Square,
        expected: Color,
        found: Color,
    },

    #[error("{piece} cannot move from {from} to {to}")]
    GeometricallyIllegal { piece: Piece, from: Square, to: Square },

    #[error("moving from {from} to {to} leaves the king in check")]
    SelfCheck { from: Square, to: Square },

    #[error("game is already over ({0})")]
    GameAlreadyTerminal(Terminal),
}

/// A board that could not have been reached through legal play.
///
/// Seeing one of these means a caller edited the board directly instead of
/// going through `apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Error returned by move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Error returned when building a game state from a custom position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
