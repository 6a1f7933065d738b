//! Edit Decision List export.
//!
//! Thin layer over the Edit Model: an EDL is just the already-authoritative
//! slice sequence of one track, read out as the ordered intervals an
//! exporter concatenates. Screen and camera EDLs are computed independently
//! — their linking is structural (same slice count, same per-clip output
//! duration), not numerical, so after per-track trims they may diverge and
//! the exporter multiplexes them.

use reeltime_project_model::{Project, Scene, Slice};

use crate::edit::Track;

/// One interval an exporter concatenates from the source media.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdlEntry {
    pub source_start_ms: i64,
    pub source_end_ms: i64,
    pub time_scale: f64,
}

impl From<&Slice> for EdlEntry {
    fn from(slice: &Slice) -> Self {
        Self {
            source_start_ms: slice.source_start_ms,
            source_end_ms: slice.source_end_ms,
            time_scale: slice.time_scale,
        }
    }
}

/// The EDL for one track of one scene.
pub fn scene_edl(scene: &Scene, track: Track) -> Vec<EdlEntry> {
    let slices = match track {
        Track::Screen => &scene.screen_slices,
        Track::Camera => &scene.camera_slices,
    };
    slices.iter().map(EdlEntry::from).collect()
}

/// The EDL for one track across every scene in the project, in scene
/// order. Used when exporting the whole timeline rather than a single
/// scene in isolation.
pub fn project_edl(project: &Project, track: Track) -> Vec<EdlEntry> {
    project
        .scenes
        .iter()
        .flat_map(|scene| scene_edl(scene, track))
        .collect()
}
