//! Core types for chess.
//!
//! This crate provides the fundamental data used by the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row 0 is rank 8)
//! - [`Move`] for coordinate-pair moves
//! - [`Board`] for occupancy
//! - FEN parsing and serialization
//!
//! None of these types know the rules of chess; that lives in `chess-engine`.

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::Board;
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::Square;
