//! The rules engine.
//!
//! [`RulesEngine`] holds no state of its own. Every call receives the board
//! or [`GameState`] it needs and returns a verdict or a fresh state; nothing
//! is retained between calls, so one engine value can serve any number of
//! independent games.
//!
//! Legality is layered:
//! 1. [`is_pseudo_legal`](RulesEngine::is_pseudo_legal): movement shape and
//!    path blocking only
//! 2. [`is_legal`](RulesEngine::is_legal): additionally the mover owns the
//!    piece and does not leave its own king in check
//! 3. [`apply_move`](RulesEngine::apply_move): commits a legal move and
//!    classifies the position for the side now to move

mod check;
mod geometry;

pub use check::{any_piece_reaches, is_in_check};
pub use geometry::is_pseudo_legal;

use chess_core::{Board, Color, Move, Piece, Square};

use crate::error::{IllegalMove, InvariantViolation, MoveError};
use crate::state::{GameState, Phase};
use crate::MoveList;

/// Classification of a position for the side to move, produced after every
/// committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// Not in check, with at least one legal move.
    Normal,
    /// In check, with at least one legal move.
    Check,
    /// In check, with no legal move. The game is over.
    Checkmate,
    /// Not in check, with no legal move. The game is over.
    Stalemate,
}

impl MoveOutcome {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, MoveOutcome::Checkmate | MoveOutcome::Stalemate)
    }

    /// Returns a lowercase name suitable for logs and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            MoveOutcome::Normal => "normal",
            MoveOutcome::Check => "check",
            MoveOutcome::Checkmate => "checkmate",
            MoveOutcome::Stalemate => "stalemate",
        }
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard chess movement without castling, en passant, or promotion.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesEngine;

impl RulesEngine {
    /// Returns the standard starting position with White to move.
    pub fn initial_state(&self) -> GameState {
        GameState::new()
    }

    /// Movement-shape legality, ignoring self-check.
    #[inline]
    pub fn is_pseudo_legal(&self, board: &Board, from: Square, to: Square) -> bool {
        is_pseudo_legal(board, from, to)
    }

    /// Returns true if `color`'s king is attacked.
    #[inline]
    pub fn is_in_check(&self, board: &Board, color: Color) -> Result<bool, InvariantViolation> {
        is_in_check(board, color)
    }

    /// Checks a move for `side` and returns the moving piece if it is legal.
    ///
    /// Preconditions are tested in a fixed order, so the error names the
    /// first one violated: empty origin, wrong side, movement shape, then
    /// self-check. The board is never modified.
    pub fn check_move(
        &self,
        board: &Board,
        side: Color,
        from: Square,
        to: Square,
    ) -> Result<Piece, MoveError> {
        let piece = board
            .occupant_at(from)
            .ok_or(IllegalMove::EmptyOrigin(from))?;

        if piece.color != side {
            return Err(IllegalMove::WrongSideToMove {
                square: from,
                expected: side,
                found: piece.color,
            }
            .into());
        }

        if !is_pseudo_legal(board, from, to) {
            return Err(IllegalMove::GeometricallyIllegal { piece, from, to }.into());
        }

        let scratch = moved(board, piece, from, to);
        if is_in_check(&scratch, side)? {
            return Err(IllegalMove::SelfCheck { from, to }.into());
        }

        Ok(piece)
    }

    /// Returns true if `side` may move the piece on `from` to `to`.
    ///
    /// Only an engine invariant failure (a missing king) is an error; every
    /// rule violation is simply `false`.
    pub fn is_legal(
        &self,
        board: &Board,
        side: Color,
        from: Square,
        to: Square,
    ) -> Result<bool, InvariantViolation> {
        match self.check_move(board, side, from, to) {
            Ok(_) => Ok(true),
            Err(MoveError::Illegal(_)) => Ok(false),
            Err(MoveError::Invariant(e)) => Err(e),
        }
    }

    /// Lists every legal move for `side`.
    pub fn legal_moves(&self, board: &Board, side: Color) -> Result<MoveList, InvariantViolation> {
        let mut moves = MoveList::new();
        for (from, _) in board.pieces(side) {
            for to in Square::all() {
                if self.is_legal(board, side, from, to)? {
                    moves.push(Move::new(from, to));
                }
            }
        }
        Ok(moves)
    }

    /// Returns true if `side` has at least one legal move.
    ///
    /// Stops at the first legal move found.
    pub fn has_legal_move(&self, board: &Board, side: Color) -> Result<bool, InvariantViolation> {
        for (from, _) in board.pieces(side) {
            for to in Square::all() {
                if self.is_legal(board, side, from, to)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Classifies the position for `side`, the side to move.
    pub fn classify(&self, board: &Board, side: Color) -> Result<MoveOutcome, InvariantViolation> {
        let in_check = is_in_check(board, side)?;
        let any_legal = self.has_legal_move(board, side)?;

        Ok(match (in_check, any_legal) {
            (true, false) => MoveOutcome::Checkmate,
            (false, false) => MoveOutcome::Stalemate,
            (true, true) => MoveOutcome::Check,
            (false, true) => MoveOutcome::Normal,
        })
    }

    /// Applies a move, returning the next state and its classification.
    ///
    /// The input state is left as it was whether the move succeeds or not.
    /// A state that has already reached checkmate or stalemate refuses every
    /// move with [`IllegalMove::GameAlreadyTerminal`].
    pub fn apply_move(
        &self,
        state: &GameState,
        from: Square,
        to: Square,
    ) -> Result<(GameState, MoveOutcome), MoveError> {
        if let Phase::Terminal(terminal) = state.phase() {
            return Err(IllegalMove::GameAlreadyTerminal(terminal).into());
        }

        let side = state.side_to_move();
        let piece = self.check_move(state.board(), side, from, to)?;

        let board = moved(state.board(), piece, from, to);
        let next_side = side.opposite();
        let outcome = self.classify(&board, next_side)?;

        Ok((
            GameState::from_parts(board, next_side, Phase::after(outcome)),
            outcome,
        ))
    }
}

/// Returns a copy of `board` with `piece` relocated from `from` to `to`.
fn moved(board: &Board, piece: Piece, from: Square, to: Square) -> Board {
    let mut next = *board;
    next.place(to, Some(piece));
    next.place(from, None);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Terminal;
    use chess_core::PieceKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).unwrap()
    }

    #[test]
    fn twenty_legal_moves_from_start() {
        let board = Board::standard();
        let moves = RulesEngine.legal_moves(&board, Color::White).unwrap();
        assert_eq!(moves.len(), 20);
        let moves = RulesEngine.legal_moves(&board, Color::Black).unwrap();
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn set_up_position_with_many_queens_lists_every_move() {
        // Unreachable in play but accepted from FEN; well over 256 moves.
        let s = state("kbQQQQQQ/ppQ4Q/Q6Q/1Q5Q/Q6Q/Q6Q/Q6Q/QQQQQQQK w");
        let moves = RulesEngine.legal_moves(s.board(), Color::White).unwrap();
        assert!(moves.len() > 256);
        assert!(moves.contains(Move::new(sq("c7"), sq("b7"))));
        assert!(RulesEngine.has_legal_move(s.board(), Color::White).unwrap());
    }

    #[test]
    fn apply_move_relocates_and_flips_side() {
        let start = GameState::new();
        let (next, outcome) = RulesEngine.apply_move(&start, sq("e2"), sq("e4")).unwrap();

        assert_eq!(outcome, MoveOutcome::Normal);
        assert_eq!(next.side_to_move(), Color::Black);
        assert!(next.board().is_empty(sq("e2")));
        assert_eq!(
            next.board().occupant_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        // Original untouched.
        assert_eq!(start, GameState::new());
    }

    #[test]
    fn rejection_reasons_in_order() {
        let start = GameState::new();

        assert_eq!(
            RulesEngine.apply_move(&start, sq("e4"), sq("e5")),
            Err(MoveError::Illegal(IllegalMove::EmptyOrigin(sq("e4"))))
        );
        assert_eq!(
            RulesEngine.apply_move(&start, sq("e7"), sq("e5")),
            Err(MoveError::Illegal(IllegalMove::WrongSideToMove {
                square: sq("e7"),
                expected: Color::White,
                found: Color::Black,
            }))
        );
        assert_eq!(
            RulesEngine.apply_move(&start, sq("e2"), sq("e5")),
            Err(MoveError::Illegal(IllegalMove::GeometricallyIllegal {
                piece: Piece::new(Color::White, PieceKind::Pawn),
                from: sq("e2"),
                to: sq("e5"),
            }))
        );
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // White knight on e2 shields the king from the rook on e8.
        let s = state("4r1k1/8/8/8/8/8/4N3/4K3 w");
        assert_eq!(
            RulesEngine.apply_move(&s, sq("e2"), sq("c3")),
            Err(MoveError::Illegal(IllegalMove::SelfCheck {
                from: sq("e2"),
                to: sq("c3"),
            }))
        );
        assert_eq!(
            RulesEngine.is_legal(s.board(), Color::White, sq("e2"), sq("c3")),
            Ok(false)
        );
    }

    #[test]
    fn king_cannot_step_into_check() {
        let s = state("4r1k1/8/8/8/8/8/8/3K4 w");
        assert!(!RulesEngine
            .is_legal(s.board(), Color::White, sq("d1"), sq("e1"))
            .unwrap());
        assert!(RulesEngine
            .is_legal(s.board(), Color::White, sq("d1"), sq("c1"))
            .unwrap());
    }

    #[test]
    fn capturing_the_checker_is_legal() {
        let s = state("6k1/8/8/8/8/8/4r3/4K3 w");
        let (next, outcome) = RulesEngine.apply_move(&s, sq("e1"), sq("e2")).unwrap();
        assert_eq!(outcome, MoveOutcome::Normal);
        assert_eq!(next.board().pieces(Color::Black).count(), 1);
    }

    #[test]
    fn check_outcome_reported_for_side_to_move() {
        let s = state("4k3/8/8/8/8/8/8/R3K3 w");
        let (next, outcome) = RulesEngine.apply_move(&s, sq("a1"), sq("a8")).unwrap();
        assert_eq!(outcome, MoveOutcome::Check);
        assert_eq!(next.phase(), Phase::InProgress);
        assert_eq!(RulesEngine.is_in_check(next.board(), Color::Black), Ok(true));
    }

    #[test]
    fn terminal_state_refuses_moves() {
        let s = state("k7/2Q5/1K6/8/8/8/8/8 b");
        assert_eq!(
            RulesEngine.apply_move(&s, sq("a8"), sq("a7")),
            Err(MoveError::Illegal(IllegalMove::GameAlreadyTerminal(
                Terminal::Stalemate
            )))
        );
    }

    #[test]
    fn missing_king_surfaces_as_invariant_violation() {
        let mut board = Board::standard();
        board.place(sq("e1"), None);
        assert_eq!(
            RulesEngine.is_legal(&board, Color::White, sq("e2"), sq("e4")),
            Err(InvariantViolation::MissingKing(Color::White))
        );
        assert_eq!(
            RulesEngine.classify(&board, Color::White),
            Err(InvariantViolation::MissingKing(Color::White))
        );
    }

    #[test]
    fn outcome_names() {
        assert_eq!(MoveOutcome::Checkmate.to_string(), "checkmate");
        assert!(MoveOutcome::Stalemate.is_terminal());
        assert!(!MoveOutcome::Check.is_terminal());
    }
}
