use sketchboard_core::{ColorParseError, ConfigError};
use sketchboard_render::RenderError;
use thiserror::Error;

/// Errors surfaced by the command line shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}
