//! Game settings and preferences
//!
//! Read once at startup from an optional JSON file. Anything missing falls
//! back to defaults; a broken file is reported and ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::tuning::{Tuning, Variant};

/// Environment variable naming an alternative settings file
pub const SETTINGS_ENV: &str = "RARA_ARCADE_SETTINGS";
/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "arcade-settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames (and simulation ticks) per second
    pub target_fps: u32,
    /// Fixed session seed; random per launch when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Play sound effects (terminal bell)
    pub sound: bool,
    /// Master volume (0.0 - 1.0); 0 keeps the bell quiet
    pub volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Plain white-on-black palette
    pub high_contrast: bool,

    // === Assets ===
    /// Directory searched for optional ASCII sprites
    pub assets_dir: PathBuf,

    /// Balance override; only used when its variant matches the game
    pub tuning: Option<Tuning>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            seed: None,
            sound: true,
            volume: 0.8,
            show_fps: false,
            high_contrast: false,
            assets_dir: PathBuf::from("assets"),
            tuning: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `$RARA_ARCADE_SETTINGS` or `./arcade-settings.json`
    pub fn load() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::load_from(&path)
    }

    /// Load from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values the frame loop cannot work with
    fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(10, 240);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Self::default().volume
        };
        self
    }

    /// The tuning to play `variant` with
    pub fn tuning_for(&self, variant: Variant) -> Tuning {
        match &self.tuning {
            Some(t) if t.variant == variant => t.clone(),
            Some(t) => {
                log::warn!(
                    "Tuning override is for {:?}, not {:?}; using defaults",
                    t.variant,
                    variant
                );
                Tuning::for_variant(variant)
            }
            None => Tuning::for_variant(variant),
        }
    }

    /// The seed for this launch
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
