//! `Slice` — a selection of one source track played back at a given speed.
//!
//! A slice is the atomic unit of non-destructive editing.
//! All durations here are integer milliseconds; the rounding policy for
//! converting between output and source time lives in `reeltime-timeline`,
//! not here — this module only owns the data and its own-field invariants.

use reeltime_common::config::MIN_SLICE_MS;
use serde::{Deserialize, Serialize};

use crate::ids::SliceId;

/// A half-open `[source_start_ms, source_end_ms)` selection of a recording,
/// played back at `time_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub id: SliceId,
    pub source_start_ms: i64,
    pub source_end_ms: i64,
    /// Playback speed: `1.0` = real-time, `2.0` = double speed.
    /// `output_duration = source_duration / time_scale`.
    pub time_scale: f64,
    /// Linear volume multiplier, independent of mute state.
    pub volume: f64,
    pub hide_cursor: bool,
    pub disable_cursor_smoothing: bool,
}

/// Reasons a `Slice` fails its own-field validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SliceInvalid {
    #[error("source_start_ms ({0}) must be >= 0")]
    NegativeStart(i64),
    #[error("slice source duration ({duration}ms) is shorter than MIN_SLICE_MS ({min}ms)")]
    TooShort { duration: i64, min: i64 },
    #[error("time_scale ({0}) must be > 0")]
    NonPositiveTimeScale(f64),
}

impl Slice {
    /// Construct a new slice with a fresh ID, validating its own fields.
    pub fn new(
        source_start_ms: i64,
        source_end_ms: i64,
        time_scale: f64,
    ) -> Result<Self, SliceInvalid> {
        let slice = Self {
            id: SliceId::new(),
            source_start_ms,
            source_end_ms,
            time_scale,
            volume: 1.0,
            hide_cursor: false,
            disable_cursor_smoothing: false,
        };
        slice.validate()?;
        Ok(slice)
    }

    /// A slice covering the recording's full `[0, duration_ms)` at real-time
    /// speed, as created for the default scene of a fresh recording.
    pub fn full_duration(duration_ms: i64) -> Result<Self, SliceInvalid> {
        Self::new(0, duration_ms, 1.0)
    }

    /// Check this slice's own-field invariants (non-negative start, positive
    /// time scale, minimum duration).
    pub fn validate(&self) -> Result<(), SliceInvalid> {
        if self.source_start_ms < 0 {
            return Err(SliceInvalid::NegativeStart(self.source_start_ms));
        }
        if self.time_scale <= 0.0 {
            return Err(SliceInvalid::NonPositiveTimeScale(self.time_scale));
        }
        let duration = self.source_end_ms - self.source_start_ms;
        if duration < MIN_SLICE_MS {
            return Err(SliceInvalid::TooShort {
                duration,
                min: MIN_SLICE_MS,
            });
        }
        Ok(())
    }

    /// Source-time duration, in milliseconds (before applying `time_scale`).
    pub fn source_duration_ms(&self) -> i64 {
        self.source_end_ms - self.source_start_ms
    }
}

/// A partial update applied to an existing slice by `update_slice`. Only
/// the populated fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlicePatch {
    pub source_start_ms: Option<i64>,
    pub source_end_ms: Option<i64>,
    pub time_scale: Option<f64>,
    pub volume: Option<f64>,
    pub hide_cursor: Option<bool>,
    pub disable_cursor_smoothing: Option<bool>,
}

impl Slice {
    /// Apply a patch, returning the updated slice without mutating `self`.
    /// The caller is responsible for re-validating the result before
    /// committing.
    pub fn with_patch(&self, patch: &SlicePatch) -> Self {
        Self {
            id: self.id,
            source_start_ms: patch.source_start_ms.unwrap_or(self.source_start_ms),
            source_end_ms: patch.source_end_ms.unwrap_or(self.source_end_ms),
            time_scale: patch.time_scale.unwrap_or(self.time_scale),
            volume: patch.volume.unwrap_or(self.volume),
            hide_cursor: patch.hide_cursor.unwrap_or(self.hide_cursor),
            disable_cursor_smoothing: patch
                .disable_cursor_smoothing
                .unwrap_or(self.disable_cursor_smoothing),
        }
    }
}
