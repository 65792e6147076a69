//! Board occupancy.

use std::fmt;

use crate::fen::{parse_placement, placement};
use crate::{Color, FenError, Piece, PieceKind, Square};

/// The 8x8 grid of optional pieces.
///
/// This is pure data: it knows nothing about how pieces move. The board is
/// `Copy`, so a scratch copy for trial moves costs 64 small cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Back row layout from the a-file to the h-file.
    const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (col, kind) in Self::BACK_ROW.iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(color, *kind));
                board.cells[pawns][col] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    /// Creates a board from a FEN piece placement field.
    pub fn from_fen_placement(text: &str) -> Result<Self, FenError> {
        parse_placement(text)
    }

    /// Returns the FEN piece placement field for this board.
    pub fn to_fen_placement(&self) -> String {
        placement(self)
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub const fn occupant_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Overwrites a square unconditionally.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Returns true if the square is empty.
    #[inline]
    pub const fn is_empty(&self, sq: Square) -> bool {
        self.occupant_at(sq).is_none()
    }

    /// Finds the king of the given color by linear scan.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::all().find(|&sq| self.occupant_at(sq) == Some(king))
    }

    /// Iterates over the squares occupied by pieces of the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.occupant_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Counts pieces of a given color and kind.
    pub fn count(&self, piece: Piece) -> usize {
        Square::all()
            .filter(|&sq| self.occupant_at(sq) == Some(piece))
            .count()
    }

    /// Returns the raw grid, row 0 (rank 8) first.
    #[inline]
    pub const fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Returns the board with rows reversed and every piece's color swapped.
    ///
    /// The result is the same position seen from the other side.
    pub fn mirrored(&self) -> Self {
        let mut out = Board::empty();
        for sq in Square::all() {
            out.place(sq.mirrored(), self.occupant_at(sq).map(Piece::recolored));
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                let c = cell.map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
