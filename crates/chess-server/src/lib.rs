//! Chess Server Library
//!
//! An Axum-based web server for playing chess in the browser:
//! - REST API endpoints to create games and submit moves
//! - An optional computer opponent that plays random legal moves
//! - JSON files for finished games
//! - Static files for the frontend

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod sessions;
pub mod storage;

use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use config::{AiColor, ServerConfig};
use sessions::SessionRegistry;
use storage::{GameStore, JsonFileStore, NoopStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Running games.
    pub sessions: Arc<SessionRegistry>,
    /// Where finished games go.
    pub store: Arc<dyn GameStore>,
    /// Side the computer plays when a new game does not say.
    pub default_ai: AiColor,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, default_ai: AiColor) -> Self {
        AppState {
            sessions: Arc::new(SessionRegistry::new()),
            store,
            default_ai,
        }
    }

    /// Builds the state described by a configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let store: Arc<dyn GameStore> = if config.persist_games {
            Arc::new(JsonFileStore::new(&config.data_dir))
        } else {
            Arc::new(NoopStore)
        };
        Self::new(store, config.ai_color)
    }
}

/// Health check endpoint.
///
/// Returns "ok" to indicate the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Builds the application router.
///
/// Paths outside the API fall through to files under `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    // CORS layer for cross-origin requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/games", post(api::games::create_game))
        .route("/api/games/:id", get(api::games::get_game))
        .route("/api/games/:id/moves", post(api::games::submit_move))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::timing_layer))
        .layer(cors)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
}
