//! Game state: board, side to move, and phase.

use std::fmt;

use chess_core::{Board, Color, Fen, Piece, PieceKind};

use crate::error::SetupError;
use crate::rules::{MoveOutcome, RulesEngine};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Checkmate,
    Stalemate,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Checkmate => write!(f, "checkmate"),
            Terminal::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Lifecycle of a game.
///
/// `InProgress` moves to `Terminal` on a checkmate or stalemate outcome.
/// `Terminal` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    InProgress,
    Terminal(Terminal),
}

impl Phase {
    /// Returns the phase a game enters after a move with the given outcome.
    pub const fn after(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Normal | MoveOutcome::Check => Phase::InProgress,
            MoveOutcome::Checkmate => Phase::Terminal(Terminal::Checkmate),
            MoveOutcome::Stalemate => Phase::Terminal(Terminal::Stalemate),
        }
    }
}

/// A position together with whose turn it is.
///
/// States are values: [`RulesEngine::apply_move`] takes a state by reference
/// and hands back a new one, so a rejected move cannot disturb the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    phase: Phase,
}

impl GameState {
    /// Creates the standard starting position with White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            side_to_move: Color::White,
            phase: Phase::InProgress,
        }
    }

    pub(crate) const fn from_parts(board: Board, side_to_move: Color, phase: Phase) -> Self {
        GameState {
            board,
            side_to_move,
            phase,
        }
    }

    /// Creates a state from an arbitrary board.
    ///
    /// The board must hold exactly one king per color, and the side that is
    /// not on move must not be in check (otherwise its king could be taken).
    /// The phase is derived from the position, so a board that is already
    /// mate or stalemate yields a terminal state.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, SetupError> {
        for color in Color::ALL {
            let count = board.count(Piece::new(color, PieceKind::King));
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        let engine = RulesEngine;
        let waiting = side_to_move.opposite();
        if engine.is_in_check(&board, waiting)? {
            return Err(SetupError::OpponentInCheck(waiting));
        }

        let outcome = engine.classify(&board, side_to_move)?;

        Ok(GameState::from_parts(
            board,
            side_to_move,
            Phase::after(outcome),
        ))
    }

    /// Creates a state from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parsed = Fen::parse(fen)?;
        Self::from_board(parsed.board, parsed.active_color)
    }

    /// Returns the board.
    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current phase.
    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns how the game ended, if it has.
    #[inline]
    pub const fn terminal(&self) -> Option<Terminal> {
        match self.phase {
            Phase::InProgress => None,
            Phase::Terminal(t) => Some(t),
        }
    }

    /// Returns true once checkmate or stalemate has been reached.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    /// Returns the position as FEN with the given fullmove number.
    pub fn to_fen(&self, fullmove_number: u32) -> String {
        Fen {
            board: self.board,
            active_color: self.side_to_move,
            halfmove_clock: 0,
            fullmove_number,
        }
        .to_fen()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state() {
        let state = GameState::new();
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.phase(), Phase::InProgress);
        assert!(!state.is_terminal());
        assert_eq!(state.terminal(), None);
        assert_eq!(state.to_fen(1), Fen::STARTPOS);
    }

    #[test]
    fn phase_after_outcome() {
        assert_eq!(Phase::after(MoveOutcome::Normal), Phase::InProgress);
        assert_eq!(Phase::after(MoveOutcome::Check), Phase::InProgress);
        assert_eq!(
            Phase::after(MoveOutcome::Checkmate),
            Phase::Terminal(Terminal::Checkmate)
        );
        assert_eq!(
            Phase::after(MoveOutcome::Stalemate),
            Phase::Terminal(Terminal::Stalemate)
        );
    }

    #[test]
    fn from_fen_rejects_missing_king() {
        let err = GameState::from_fen("8/8/8/8/8/8/8/4K3 w").unwrap_err();
        assert_eq!(
            err,
            SetupError::KingCount {
                color: Color::Black,
                count: 0
            }
        );
    }

    #[test]
    fn from_fen_rejects_two_kings() {
        let err = GameState::from_fen("k6k/8/8/8/8/8/8/4K3 w").unwrap_err();
        assert_eq!(
            err,
            SetupError::KingCount {
                color: Color::Black,
                count: 2
            }
        );
    }

    #[test]
    fn from_fen_rejects_waiting_side_in_check() {
        // Black king on e8 is attacked by the rook, but it is White's move.
        let err = GameState::from_fen("4k3/8/8/8/8/8/8/4R1K1 w").unwrap_err();
        assert_eq!(err, SetupError::OpponentInCheck(Color::Black));
    }

    #[test]
    fn from_fen_detects_terminal_position() {
        let state = GameState::from_fen("k7/2Q5/1K6/8/8/8/8/8 b").unwrap();
        assert_eq!(state.terminal(), Some(Terminal::Stalemate));
    }

    #[test]
    fn from_fen_propagates_syntax_errors() {
        assert!(matches!(
            GameState::from_fen("not a fen"),
            Err(SetupError::Fen(_))
        ));
    }
}
