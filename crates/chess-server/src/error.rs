//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chess_engine::{GameError, IllegalMove, InvariantViolation, MoveError};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the game handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("game not found: {0}")]
    NotFound(String),

    /// The request body is not the JSON the endpoint expects.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        ApiError::Game(GameError::Move(err))
    }
}

impl From<InvariantViolation> for ApiError {
    fn from(err: InvariantViolation) -> Self {
        MoveError::Invariant(err).into()
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl ApiError {
    /// Returns the HTTP status and a stable machine-readable tag.
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            ApiError::Game(GameError::InvalidNotation(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_notation")
            }
            ApiError::Game(GameError::Move(MoveError::Illegal(illegal))) => match illegal {
                IllegalMove::EmptyOrigin(_) => (StatusCode::BAD_REQUEST, "empty_origin"),
                IllegalMove::WrongSideToMove { .. } => {
                    (StatusCode::BAD_REQUEST, "wrong_side_to_move")
                }
                IllegalMove::GeometricallyIllegal { .. } => {
                    (StatusCode::BAD_REQUEST, "geometrically_illegal")
                }
                IllegalMove::SelfCheck { .. } => (StatusCode::BAD_REQUEST, "self_check"),
                IllegalMove::GameAlreadyTerminal(_) => {
                    (StatusCode::CONFLICT, "game_already_terminal")
                }
            },
            ApiError::Game(GameError::Move(MoveError::Invariant(_))) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
            kind,
        };
        (status, Json(body)).into_response()
    }
}
