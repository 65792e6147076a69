//! Configuration file loading for the chess server.
//!
//! Settings come from a TOML file. Every field has a default, so a missing
//! file or a partial one is fine.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Which side the computer plays in new games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiColor {
    White,
    #[default]
    Black,
    /// Both sides are played through the API.
    None,
}

impl AiColor {
    /// Returns the color the computer plays, if any.
    pub const fn color(self) -> Option<Color> {
        match self {
            AiColor::White => Some(Color::White),
            AiColor::Black => Some(Color::Black),
            AiColor::None => None,
        }
    }
}

/// Main server configuration structure.
///
/// Uses `chess-server.toml` in the current directory unless another path is
/// given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on. Defaults to `127.0.0.1:8000`.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Directory served for any path the API does not handle.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Directory finished games are written to.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Whether finished games are written to `data_dir`.
    #[serde(default = "default_persist_games")]
    pub persist_games: bool,
    /// Side the computer plays when a request does not say.
    #[serde(default)]
    pub ai_color: AiColor,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/games")
}

fn default_persist_games() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            static_dir: default_static_dir(),
            data_dir: default_data_dir(),
            persist_games: default_persist_games(),
            ai_color: AiColor::default(),
        }
    }
}

impl ServerConfig {
    /// File name looked up in the working directory when no path is given.
    pub const DEFAULT_PATH: &'static str = "chess-server.toml";

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, [`Self::DEFAULT_PATH`] is
    /// read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(Self::DEFAULT_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}
