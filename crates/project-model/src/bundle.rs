//! `RecordingBundle` — the immutable, externally-produced recording the
//! engine edits. Capture and on-disk layout are out of scope; this module
//! only models what the core reads after load.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::{CursorId, MouseClickEvent, MouseMoveEvent};

/// Video track metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoMeta {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_ms: i64,
}

/// Metadata for an optional secondary (webcam/audio) track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackMeta {
    pub duration_ms: i64,
}

/// One cursor image available for rendering, keyed by [`CursorId`] in
/// [`RecordingBundle::cursors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorImage {
    /// Opaque reference to image bytes; the rendering collaborator resolves
    /// this, the core never decodes it.
    pub image_ref: String,
    /// Hotspot offset, in the cursor image's own pixel space.
    pub hotspot_x: f64,
    pub hotspot_y: f64,
}

/// The pre-materialized, read-only recording bundle the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingBundle {
    pub video: VideoMeta,
    pub webcam: Option<TrackMeta>,
    pub mic_audio: Option<TrackMeta>,
    pub system_audio: Option<TrackMeta>,

    /// Sorted ascending by `process_time_ms`.
    pub mouse_moves: Vec<MouseMoveEvent>,
    /// Sorted ascending by `process_time_ms`.
    pub mouse_clicks: Vec<MouseClickEvent>,

    pub cursors: HashMap<CursorId, CursorImage>,
}

/// Reasons a bundle fails to load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BundleInvalid {
    #[error("video metadata missing or unparseable")]
    MissingVideo,
    #[error("mouse_moves is not sorted by process_time_ms at index {0}")]
    UnsortedMoves(usize),
    #[error("mouse_clicks is not sorted by process_time_ms at index {0}")]
    UnsortedClicks(usize),
}

impl RecordingBundle {
    /// Validate that both event streams are sorted and monotonic in
    /// `process_time_ms`. Capture-side parsing of the on-disk layout is a
    /// collaborator's concern; this is the one check the core performs
    /// before trusting a loaded bundle.
    pub fn validate(&self) -> Result<(), BundleInvalid> {
        if self.video.duration_ms <= 0 {
            return Err(BundleInvalid::MissingVideo);
        }
        for (i, pair) in self.mouse_moves.windows(2).enumerate() {
            if pair[1].sample.process_time_ms < pair[0].sample.process_time_ms {
                return Err(BundleInvalid::UnsortedMoves(i + 1));
            }
        }
        for (i, pair) in self.mouse_clicks.windows(2).enumerate() {
            if pair[1].process_time_ms < pair[0].process_time_ms {
                return Err(BundleInvalid::UnsortedClicks(i + 1));
            }
        }
        Ok(())
    }
}
