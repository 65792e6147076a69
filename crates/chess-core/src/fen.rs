//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Only piece placement and the active color carry meaning in this rule set.
//! Castling and en passant fields are accepted for compatibility with
//! standard FEN strings but ignored; serialization always writes `-` for both.

use crate::{Board, Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 2 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement.
    pub board: Board,
    /// Side to move.
    pub active_color: Color,
    /// Halfmove clock. Carried through but not interpreted.
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

    /// Parses a FEN string.
    ///
    /// Placement and active color are required; the remaining four fields
    /// default to `- - 0 1` when omitted.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if !(2..=6).contains(&parts.len()) {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = parse_placement(parts[0])?;

        let mut color_chars = parts[1].chars();
        let active_color = match (color_chars.next(), color_chars.next()) {
            (Some(c), None) => Color::from_fen_char(c),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidActiveColor(parts[1].to_string()))?;

        if let Some(castling) = parts.get(2) {
            validate_castling(castling)?;
        }

        if let Some(ep) = parts.get(3) {
            validate_en_passant(ep)?;
        }

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(s.to_string()))?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(s.to_string()))?,
            None => 1,
        };

        Ok(Fen {
            board,
            active_color,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} - - {} {}",
            placement(&self.board),
            self.active_color.to_fen_char(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for Fen {
    fn default() -> Self {
        Fen {
            board: Board::standard(),
            active_color: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Parses the piece placement field into a board.
pub fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0.
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0u32;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += skip;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                if let Some(sq) = Square::new(row as u8, col as u8) {
                    board.place(sq, Some(piece));
                }
                col += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    8 - row
                )));
            }
            if col > 8 {
                break;
            }
        }
        if col != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                8 - row,
                col
            )));
        }
    }

    Ok(board)
}

/// Serializes a board into the FEN piece placement field.
pub fn placement(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for (row, cells) in board.rows().iter().enumerate() {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
    }
    out
}

fn validate_castling(castling: &str) -> Result<(), FenError> {
    if castling == "-" {
        return Ok(());
    }

    for c in castling.chars() {
        if !"KQkq".contains(c) {
            return Err(FenError::InvalidCastlingRights(format!(
                "invalid character '{}'",
                c
            )));
        }
    }

    Ok(())
}

fn validate_en_passant(ep: &str) -> Result<(), FenError> {
    if ep == "-" {
        return Ok(());
    }

    let chars: Vec<char> = ep.chars().collect();
    if chars.len() != 2 || !('a'..='h').contains(&chars[0]) || !(chars[1] == '3' || chars[1] == '6')
    {
        return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
    }

    Ok(())
}
