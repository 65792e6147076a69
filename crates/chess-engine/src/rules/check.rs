//! Check detection by full board scan.

use chess_core::{Board, Color, Square};

use super::geometry::is_pseudo_legal;
use crate::error::InvariantViolation;

/// Returns true if `color`'s king is attacked by any opposing piece.
///
/// Scans every opposing piece for a pseudo-legal move onto the king square.
pub fn is_in_check(board: &Board, color: Color) -> Result<bool, InvariantViolation> {
    let king = board
        .find_king(color)
        .ok_or(InvariantViolation::MissingKing(color))?;
    Ok(any_piece_reaches(board, king, color.opposite()))
}

/// Returns true if any piece of `by` has a pseudo-legal move onto `target`.
///
/// On an empty square this counts pawn pushes and ignores pawn diagonals,
/// so it only matches the usual notion of "attacked" for occupied squares
/// such as the king's.
pub fn any_piece_reaches(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| is_pseudo_legal(board, from, target))
}
