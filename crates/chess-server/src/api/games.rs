//! Game API handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bot_random::RandomPicker;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{CreateGameRequest, GameView, MoveRequest, MoveResponse};
use crate::sessions::{Session, SessionHandle, SessionRegistry};
use crate::AppState;

/// Decodes a JSON request body, reporting failures as [`ApiError::InvalidBody`].
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::InvalidBody(err.to_string()))
}

/// Finds a session, returning its id in canonical hyphenated form.
fn lookup(sessions: &SessionRegistry, id: &str) -> Result<(String, SessionHandle), ApiError> {
    sessions
        .get(id)
        .map(|(uuid, handle)| (uuid.to_string(), handle))
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

/// Start a new game.
///
/// # Endpoint
///
/// `POST /api/games`
///
/// # Request Body
///
/// Optional. `{"ai_color": "white" | "black" | "none"}`; the configured
/// default applies when the body or the field is absent. If the computer
/// plays White it makes its first move before the response is sent.
///
/// # Response
///
/// - `201 Created`: JSON game view
/// - `400 Bad Request`: A body that is present but not a valid request
pub async fn create_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let request: CreateGameRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateGameRequest::default()
    } else {
        parse_body(&body)?
    };
    let ai = request.ai_color.unwrap_or(state.default_ai).color();

    let mut session = Session::new(ai, RandomPicker::from_entropy());
    let opening = session.ai_reply()?;

    let view_game = session.game.clone();
    let id = state.sessions.insert(session).to_string();

    tracing::info!(game_id = %id, ai = ?ai, "Game created");
    if let Some(m) = opening {
        tracing::debug!(game_id = %id, uci = %m, "Computer opened");
    }

    Ok((StatusCode::CREATED, Json(GameView::new(&id, &view_game))))
}

/// Get the current state of a game.
///
/// # Endpoint
///
/// `GET /api/games/:id`
///
/// # Response
///
/// - `200 OK`: JSON game view
/// - `404 Not Found`: No game with the given ID
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let (id, handle) = lookup(&state.sessions, &id)?;
    let session = handle.lock().await;
    Ok(Json(GameView::new(&id, &session.game)))
}

/// Submit a move, and get the computer's reply if it is its turn.
///
/// # Endpoint
///
/// `POST /api/games/:id/moves`
///
/// # Request Body
///
/// `{"uci": "e2e4"}`
///
/// # Response
///
/// - `200 OK`: `{"game": <game view>, "ai_move": "e7e5" | null}`
/// - `400 Bad Request`: Malformed body or notation, or a move the rules forbid
/// - `404 Not Found`: No game with the given ID
/// - `409 Conflict`: The game is already over
pub async fn submit_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MoveResponse>, ApiError> {
    let (id, handle) = lookup(&state.sessions, &id)?;
    let request: MoveRequest = parse_body(&body)?;
    // Held for the whole read-modify-write so moves on one game never interleave.
    let mut session = handle.lock().await;

    let outcome = session.game.make_move_uci(&request.uci).map_err(|err| {
        tracing::debug!(game_id = %id, uci = %request.uci, error = %err, "Move rejected");
        err
    })?;
    tracing::info!(game_id = %id, uci = %request.uci, outcome = %outcome, "Move applied");

    let ai_move = session.ai_reply()?;
    if let Some(m) = ai_move {
        tracing::info!(game_id = %id, uci = %m, outcome = %session.game.status(), "Computer replied");
    }

    if let Some(record) = session.game.record() {
        tracing::info!(game_id = %id, result = %record.result, termination = %record.termination, "Game over");
        if let Err(err) = state.store.save(&id, &record) {
            tracing::error!(game_id = %id, error = %err, "Failed to save finished game");
        }
    }

    Ok(Json(MoveResponse {
        game: GameView::new(&id, &session.game),
        ai_move: ai_move.map(|m| m.to_uci()),
    }))
}
