//! `FrameState`: the immutable snapshot the Resolver publishes once per
//! tick and once per seek.

use reeltime_cursor::{RecentClick, SmoothedPoint};

use crate::audio::AudioDrift;
use crate::layout_resolve::LayoutRenderInfo;

/// One published frame of playback state. Consumers (renderer, cursor
/// overlay, exporter-frame-enumerator) read this and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub t_out: i64,
    pub slice_index: i64,
    pub source_time_ms: i64,
    pub active_layout: LayoutRenderInfo,
    /// `None` if the active slice hides the cursor.
    pub cursor: Option<SmoothedPoint>,
    /// Clicks with age ≤ `CLICK_FADE_MS`.
    pub recent_clicks: Vec<RecentClick>,
    /// Per-audio-track `Δ_audio`, current as of the bundle last passed to
    /// `Resolver::new`/`Resolver::update_scene`.
    pub audio_drift: AudioDrift,
    /// Set when a tick encountered a recoverable condition; logged here
    /// rather than aborting playback.
    pub warning: Option<String>,
}

/// What a tick produced: a frame to publish, or the end of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Frame(FrameState),
    EndOfStream,
}
