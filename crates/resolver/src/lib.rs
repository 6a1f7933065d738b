//! reeltime Resolver
//!
//! The Playback Clock & Resolver: the stateful run-loop that drives a
//! `MediaClock`, maps output time through the active scene's slices and
//! layouts, advances the Cursor Smoother, and publishes a `FrameState`
//! each tick. Also carries the audio/video alignment helpers.

pub mod audio;
pub mod frame_state;
pub mod layout_resolve;
pub mod media_clock;
pub mod resolver;

pub use audio::{audio_offset_ms, audio_target_time_ms, exceeds_resync_threshold, AudioDrift};
pub use frame_state::{FrameState, TickOutcome};
pub use layout_resolve::{find_layout_at, resolve_layout_rects, LayoutRenderInfo, Rect, SIDE_BY_SIDE_GAP_PX};
pub use media_clock::{MediaClock, MediaMetadata, SimulatedMediaClock};
pub use resolver::Resolver;
