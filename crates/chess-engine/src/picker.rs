//! Move selection for automated players.

use chess_core::{Board, Color, Move};

use crate::MoveList;

/// Chooses a move for an automated side.
///
/// The engine hands over the current board, the side to move, and the full
/// list of legal moves. Returning `None` means "no move" and is only
/// expected when the list is empty. Whatever is returned still goes through
/// the normal legality checks, so a picker that invents a move gets the same
/// rejection a human would.
pub trait MovePicker {
    fn pick_move(&mut self, board: &Board, side: Color, legal: &MoveList) -> Option<Move>;
}

impl<F> MovePicker for F
where
    F: FnMut(&Board, Color, &MoveList) -> Option<Move>,
{
    fn pick_move(&mut self, board: &Board, side: Color, legal: &MoveList) -> Option<Move> {
        self(board, side, legal)
    }
}
