//! Error types
//!
//! Gameplay never fails: death and room changes are state transitions.
//! What remains are startup failures around the presentation surface and
//! the settings file.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// The presentation surface could not be brought up. Fatal.
    #[error("Surface initialization failed: {0}")]
    SurfaceInit(String),

    #[error("Failed to read settings from {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
