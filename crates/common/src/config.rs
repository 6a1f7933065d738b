//! Engine tuning configuration.
//!
//! This is distinct from a project's `ProjectConfig` (per-project editing
//! data, owned by `reeltime-project-model`): everything here tunes the
//! engine itself and is the same for every loaded project.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimum output duration a slice is allowed to shrink to.
pub const MIN_SLICE_MS: i64 = 100;

/// Minimum output duration a layout interval is allowed to shrink to.
pub const MIN_LAYOUT_MS: i64 = 100;

/// Clicks older than this are dropped from `FrameState::recent_clicks`.
pub const CLICK_FADE_MS: i64 = 500;

/// Audio drift above this many milliseconds triggers a `MediaDrift` warning.
pub const AUDIO_RESYNC_THRESHOLD_MS: i64 = 20;

/// Fixed padding, in pixels, used when centering a `screen-with-camera`
/// overlay inside its container.
pub const CAMERA_OVERLAY_PADDING_PX: f64 = 16.0;

/// Global engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory where project files are stored.
    pub projects_dir: PathBuf,

    /// Default critically-damped spring parameters for the cursor smoother.
    pub spring: SpringDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default spring constants for the Cursor Smoother.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpringDefaults {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringDefaults {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reeltime=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            spring: SpringDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EngineConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    xdg_base("XDG_CONFIG_HOME", ".config").join("reeltime").join("config.json")
}

/// Default projects directory.
fn default_projects_dir() -> PathBuf {
    xdg_base("XDG_DATA_HOME", ".local/share")
        .join("reeltime")
        .join("projects")
}

fn xdg_base(env_var: &str, fallback_suffix: &str) -> PathBuf {
    std::env::var(env_var).map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(fallback_suffix)
    })
}
