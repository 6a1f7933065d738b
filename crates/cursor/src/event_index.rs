//! Input-Event Index: immutable, sorted indices over a recording's
//! mouse-move and mouse-click streams, built once per loaded recording and
//! queried by time.
//!
//! All times here are in the recording's SOURCE timeline — mapping output
//! time to source time is the Resolver's job, never this module's.

use reeltime_project_model::{ButtonPhase, CursorId, MouseButton, MouseClickEvent, MouseMoveEvent, RecordingBundle};
use tracing::info;

/// A mouse-move sample interpolated (or passed through) at a query time.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedPoint {
    pub x: f64,
    pub y: f64,
    /// Never interpolated — always the covering sample's own value.
    pub cursor_id: CursorId,
}

/// A click annotated with its age relative to the query time, as returned
/// by [`InputEventIndex::recent_clicks`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentClick {
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
    pub age_ms: i64,
}

/// Immutable index over one recording's event streams. Built once via
/// [`InputEventIndex::build`]; every query method takes `&self`.
#[derive(Debug, Clone)]
pub struct InputEventIndex {
    moves: Vec<MouseMoveEvent>,
    clicks: Vec<MouseClickEvent>,
}

impl InputEventIndex {
    /// Build an index from a loaded, already-[`RecordingBundle::validate`]d
    /// bundle. Building is pure CPU and safe to run on a background worker.
    pub fn build(bundle: &RecordingBundle) -> Self {
        info!(
            moves = bundle.mouse_moves.len(),
            clicks = bundle.mouse_clicks.len(),
            "built input-event index from bundle"
        );
        Self {
            moves: bundle.mouse_moves.clone(),
            clicks: bundle.mouse_clicks.clone(),
        }
    }

    /// Construct directly from already-sorted streams, for callers that do
    /// not hold a full [`RecordingBundle`] (e.g. tests, or a collaborator
    /// re-indexing a subset of a recording).
    pub fn from_streams(moves: Vec<MouseMoveEvent>, clicks: Vec<MouseClickEvent>) -> Self {
        Self { moves, clicks }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Binary-searches the greatest-indexed move sample with
    /// `process_time_ms <= t`. `None` if `t` is before the first sample.
    pub fn sample_at(&self, t: i64) -> Option<&MouseMoveEvent> {
        let count = self.moves.partition_point(|e| e.sample.process_time_ms <= t);
        if count == 0 {
            None
        } else {
            Some(&self.moves[count - 1])
        }
    }

    /// Linearly interpolates `x, y` between [`Self::sample_at`]'s result and
    /// the following sample, if one exists; otherwise returns that sample
    /// verbatim. `cursor_id` always takes the covering sample's value.
    pub fn interpolated_at(&self, t: i64) -> Option<InterpolatedPoint> {
        let count = self.moves.partition_point(|e| e.sample.process_time_ms <= t);
        if count == 0 {
            return None;
        }
        let i = count - 1;
        let current = &self.moves[i];

        let Some(next) = self.moves.get(i + 1) else {
            return Some(InterpolatedPoint {
                x: current.sample.x,
                y: current.sample.y,
                cursor_id: current.cursor_id.clone(),
            });
        };

        let span = (next.sample.process_time_ms - current.sample.process_time_ms) as f64;
        if span <= 0.0 {
            return Some(InterpolatedPoint {
                x: current.sample.x,
                y: current.sample.y,
                cursor_id: current.cursor_id.clone(),
            });
        }

        let factor = (t - current.sample.process_time_ms) as f64 / span;
        Some(InterpolatedPoint {
            x: current.sample.x + (next.sample.x - current.sample.x) * factor,
            y: current.sample.y + (next.sample.y - current.sample.y) * factor,
            cursor_id: current.cursor_id.clone(),
        })
    }

    /// Clicks with `t0 <= process_time_ms <= t1`.
    pub fn clicks_in_range(&self, t0: i64, t1: i64) -> Vec<&MouseClickEvent> {
        self.clicks
            .iter()
            .filter(|c| c.process_time_ms >= t0 && c.process_time_ms <= t1)
            .collect()
    }

    /// `down`-phase clicks within `[t_now - window_ms, t_now]`, each
    /// annotated with its age relative to `t_now`.
    pub fn recent_clicks(&self, t_now: i64, window_ms: i64) -> Vec<RecentClick> {
        let earliest = t_now - window_ms;
        self.clicks
            .iter()
            .filter(|c| c.phase == ButtonPhase::Down && c.process_time_ms >= earliest && c.process_time_ms <= t_now)
            .map(|c| RecentClick {
                x: c.x,
                y: c.y,
                button: c.button,
                age_ms: t_now - c.process_time_ms,
            })
            .collect()
    }
}
