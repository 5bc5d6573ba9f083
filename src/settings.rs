//! Runtime settings
//!
//! Gameplay tuning is fixed in [`crate::consts`]; these options only control
//! how a session is run. Loaded from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::{GameError, Result};

/// Session options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks a random one
    pub seed: Option<u64>,
    /// Frame rate the loop is paced to
    pub target_fps: u32,
    /// Stop after this many gameplay frames (`None` = run until quit)
    pub max_frames: Option<u64>,
    /// Show the title screen before the first room and after each death
    pub title_screen: bool,
    /// Sleep to hold the target frame rate; off runs as fast as possible
    pub pace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: FPS,
            max_frames: Some(3600),
            title_screen: true,
            pace: true,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "SPIRE_SETTINGS";
    /// Settings file used when the variable is unset
    pub const DEFAULT_PATH: &'static str = "spire_of_ash.json";

    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GameError::SettingsRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings = serde_json::from_str(&json).map_err(|source| GameError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
