//! `Project` — the top-level aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;
use crate::scene::{Scene, SceneInvalid};

/// Output aspect ratio / framing mode. Effects compositing that would act
/// on this (padding, background) is out of scope; the field is carried as
/// data for collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Square,
    Custom { width: u32, height: u32 },
}

/// Background styling. Rendering behavior is out of scope; carried as
/// inert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub color_hex: String,
    pub padding_px: u32,
    pub shadow_intensity: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color_hex: "#1a1a1a".to_string(),
            padding_px: 0,
            shadow_intensity: 0.0,
        }
    }
}

/// Cursor-rendering configuration. The cursor *size* multiplier belongs to
/// the renderer, not the core — this struct only carries the toggles the
/// data model names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CursorRenderConfig {
    pub visible: bool,
    pub click_animation: bool,
}

impl Default for CursorRenderConfig {
    fn default() -> Self {
        Self {
            visible: true,
            click_animation: true,
        }
    }
}

/// Camera-rendering configuration shared across layouts that show a camera.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraConfig {
    pub mirrored: bool,
    pub rounded_corners_px: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mirrored: false,
            rounded_corners_px: 12,
        }
    }
}

/// Per-project audio configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioConfig {
    pub mic_volume: f64,
    pub system_audio_volume: f64,
    pub mic_muted: bool,
    pub system_audio_muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            mic_volume: 1.0,
            system_audio_volume: 1.0,
            mic_muted: false,
            system_audio_muted: false,
        }
    }
}

/// Project-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub background: BackgroundConfig,
    pub cursor: CursorRenderConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
    /// `[start_ms, end_ms]` within the bundle this project edits.
    pub recording_range: (i64, i64),
    pub output_aspect_ratio: AspectRatio,
}

impl ProjectConfig {
    pub fn for_recording(duration_ms: i64) -> Self {
        Self {
            background: BackgroundConfig::default(),
            cursor: CursorRenderConfig::default(),
            camera: CameraConfig::default(),
            audio: AudioConfig::default(),
            recording_range: (0, duration_ms),
            output_aspect_ratio: AspectRatio::Landscape,
        }
    }
}

/// The top-level aggregate: identity, creation time, configuration, and an
/// ordered sequence of scenes with exactly one active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub created_at: DateTime<Utc>,
    pub config: ProjectConfig,
    pub scenes: Vec<Scene>,
    pub active_scene_index: usize,
}

impl Project {
    /// Create an empty project with no recording and no scenes.
    pub fn empty() -> Self {
        Self {
            id: ProjectId::new(),
            created_at: Utc::now(),
            config: ProjectConfig::for_recording(0),
            scenes: vec![],
            active_scene_index: 0,
        }
    }

    /// Create a project derived from a recording, seeding one default scene.
    ///
    /// Fails if `duration_ms` is too short to satisfy the minimum slice or
    /// layout duration — a recording that short cannot seed a valid scene.
    pub fn from_recording(duration_ms: i64) -> Result<Self, SceneInvalid> {
        Ok(Self {
            id: ProjectId::new(),
            created_at: Utc::now(),
            config: ProjectConfig::for_recording(duration_ms),
            scenes: vec![Scene::from_recording("Recording 1", duration_ms)?],
            active_scene_index: 0,
        })
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.active_scene_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_has_no_scenes() {
        let project = Project::empty();
        assert!(project.scenes.is_empty());
        assert!(project.active_scene().is_none());
    }

    #[test]
    fn from_recording_seeds_one_scene() {
        let project = Project::from_recording(10_000).unwrap();
        assert_eq!(project.scenes.len(), 1);
        assert!(project.active_scene().is_some());
        assert_eq!(project.config.recording_range, (0, 10_000));
    }

    #[test]
    fn from_recording_rejects_too_short_duration() {
        assert!(Project::from_recording(50).is_err());
    }

    #[test]
    fn project_serializes_roundtrip() {
        let project = Project::from_recording(5_000).unwrap();
        let json = serde_json::to_string_pretty(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, project.id);
        assert_eq!(back.scenes.len(), 1);
    }
}
