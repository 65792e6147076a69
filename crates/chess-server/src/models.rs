//! API models for serialization.

use chess_core::Color;
use chess_engine::Game;
use serde::{Deserialize, Serialize};

use crate::config::AiColor;

/// Snapshot of a game as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    /// Session identifier.
    pub id: String,
    /// Position in FEN.
    pub fen: String,
    /// Board rows from rank 8 down to rank 1, pieces as FEN letters.
    pub board: Vec<Vec<Option<char>>>,
    /// "white" or "black".
    pub side_to_move: String,
    /// "normal", "check", "checkmate" or "stalemate".
    pub status: String,
    pub is_game_over: bool,
    /// "1-0", "0-1" or "1/2-1/2" once the game is over.
    pub result: Option<String>,
    /// Moves played so far in UCI notation.
    pub moves: Vec<String>,
}

impl GameView {
    pub fn new(id: &str, game: &Game) -> Self {
        let board = game
            .board()
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(|p| p.to_fen_char())).collect())
            .collect();

        GameView {
            id: id.to_string(),
            fen: game.to_fen(),
            board,
            side_to_move: color_name(game.side_to_move()).to_string(),
            status: game.status().as_str().to_string(),
            is_game_over: game.is_game_over(),
            result: game.result().map(|r| r.as_str().to_string()),
            moves: game.move_history().iter().map(|m| m.to_uci()).collect(),
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Body of `POST /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGameRequest {
    /// Side for the computer; the server default applies when absent.
    pub ai_color: Option<AiColor>,
}

/// Body of `POST /api/games/:id/moves`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    /// Move in UCI notation, e.g. "e2e4".
    pub uci: String,
}

/// Response to a submitted move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub game: GameView,
    /// The computer's reply, if it made one.
    pub ai_move: Option<String>,
}
