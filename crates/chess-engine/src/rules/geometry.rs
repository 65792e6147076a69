//! Per-piece movement shapes.
//!
//! Everything here ignores whether the mover's king ends up in check; that
//! is layered on top by [`RulesEngine::is_legal`](super::RulesEngine::is_legal).

use chess_core::{Board, Color, PieceKind, Square};

/// Returns true if the piece on `from` can reach `to` by its movement shape,
/// with sliding paths checked against the current board.
///
/// An empty origin, a null move, and a landing square held by the mover's
/// own color are never pseudo-legal.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.occupant_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    let target = board.occupant_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_shape(board, piece.color, from, to, d_row, d_col),
        PieceKind::Knight => matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => is_diagonal(d_row, d_col) && path_clear(board, from, to),
        PieceKind::Rook => is_straight(d_row, d_col) && path_clear(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(d_row, d_col) || is_straight(d_row, d_col))
                && path_clear(board, from, to)
        }
        PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1,
    }
}

fn pawn_shape(board: &Board, color: Color, from: Square, to: Square, d_row: i8, d_col: i8) -> bool {
    let dir = color.pawn_direction();
    let target = board.occupant_at(to);

    match d_col.abs() {
        0 if d_row == dir => target.is_none(),
        0 if d_row == 2 * dir => {
            from.row() == color.pawn_row()
                && target.is_none()
                && from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid))
        }
        // Captures only; the caller has already ruled out own-color targets.
        1 if d_row == dir => target.is_some(),
        _ => false,
    }
}

#[inline]
fn is_diagonal(d_row: i8, d_col: i8) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

#[inline]
fn is_straight(d_row: i8, d_col: i8) -> bool {
    (d_row == 0) != (d_col == 0)
}

/// Every square strictly between `from` and `to` must be empty.
///
/// Only meaningful when the two squares share a row, column, or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = (to.row() as i8 - from.row() as i8).signum();
    let step_col = (to.col() as i8 - from.col() as i8).signum();

    let mut current = from.offset(step_row, step_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_row, step_col);
    }
    false
}
