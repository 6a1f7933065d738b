//! Mouse-event sample types read from a [`crate::bundle::RecordingBundle`].
//!
//! These are bundle-provided, read-only data: sorted and monotonic in
//! `process_time_ms`. Building a queryable index over them is
//! `reeltime-cursor`'s job; this module only owns the sample shape.

use serde::{Deserialize, Serialize};

/// Identifies one of the cursor images in `RecordingBundle::cursors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorId(pub String);

impl CursorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A single mouse-move sample, in the recording's source timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveSample {
    /// Monotonic clock reading, zero = video-frame-0 wall time.
    pub process_time_ms: i64,
    pub x: f64,
    pub y: f64,
}

/// A mouse-move sample paired with the active cursor image at that instant.
///
/// Kept separate from [`MouseMoveSample`] because `cursor_id` is never
/// interpolated: interpolation only ever touches `x`/`y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveEvent {
    pub sample: MouseMoveSample,
    pub cursor_id: CursorId,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Press/release phase of a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonPhase {
    Down,
    Up,
}

/// A single mouse-click sample, in the recording's source timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseClickEvent {
    pub process_time_ms: i64,
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
    pub phase: ButtonPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_id_roundtrips() {
        let id = CursorId::new("arrow");
        let json = serde_json::to_string(&id).unwrap();
        let back: CursorId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
