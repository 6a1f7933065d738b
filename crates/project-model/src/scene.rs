//! `Scene` — an ordered group of slices and layouts forming one continuous
//! output segment.

use serde::{Deserialize, Serialize};

use crate::ids::{SceneId, ZoomRangeId};
use crate::layout::{Layout, LayoutInvalid};
use crate::slice::{Slice, SliceInvalid};

/// What kind of content a scene holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    Recording,
    Title,
    Transition,
}

/// A zoom-in/out interval. Carried as data only; its playback effect is
/// out of scope here — no module in this engine reads `target_viewport`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub id: ZoomRangeId,
    pub start_time: i64,
    pub end_time: i64,
    pub target_viewport: ZoomTarget,
}

/// Deferred zoom target shape; see [`ZoomRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTarget {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
}

/// An ordered group of slices and layouts forming one continuous output
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub scene_type: SceneType,
    /// Index of the recording session this scene is associated with, if
    /// the project was derived from a multi-session recording.
    pub recording_session_index: Option<usize>,

    /// Ordered, pairwise non-overlapping, positional (not keyed by source
    /// time).
    pub screen_slices: Vec<Slice>,
    /// Same shape as `screen_slices`; linked by position.
    pub camera_slices: Vec<Slice>,
    /// Ordered, contiguous, non-overlapping; covers
    /// `[0, total_output_duration]`.
    pub layouts: Vec<Layout>,
    pub zoom_ranges: Vec<ZoomRange>,
}

/// Reasons a fresh recording's default scene fails to construct — always a
/// `duration_ms` too short to satisfy the slice or layout minimum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneInvalid {
    #[error(transparent)]
    Slice(#[from] SliceInvalid),
    #[error(transparent)]
    Layout(#[from] LayoutInvalid),
}

impl Scene {
    /// The default scene created when a project is derived from a
    /// recording: one full-duration slice on each track, one full-duration
    /// `screen-with-camera` layout.
    pub fn from_recording(name: impl Into<String>, duration_ms: i64) -> Result<Self, SceneInvalid> {
        use crate::layout::LayoutType;

        Ok(Self {
            id: SceneId::new(),
            name: name.into(),
            scene_type: SceneType::Recording,
            recording_session_index: Some(0),
            screen_slices: vec![Slice::full_duration(duration_ms)?],
            camera_slices: vec![Slice::full_duration(duration_ms)?],
            layouts: vec![Layout::full_duration(
                duration_ms,
                LayoutType::ScreenWithCamera,
            )?],
            zoom_ranges: vec![],
        })
    }

    /// Whether both tracks currently have the same clip count.
    pub fn tracks_linked(&self) -> bool {
        self.screen_slices.len() == self.camera_slices.len()
    }
}
