//! `Layout` — an output-time interval describing how screen and camera are
//! composed.

use reeltime_common::config::MIN_LAYOUT_MS;
use serde::{Deserialize, Serialize};

use crate::ids::LayoutId;

/// How the screen and camera tracks are composed during a `Layout`'s
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    ScreenOnly,
    CameraOnly,
    ScreenWithCamera,
    SideBySide,
}

/// A normalized 2D point in `[0.0, 1.0]^2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

/// An output-time interval `[start_time, end_time)` with an active
/// compositional layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub start_time: i64,
    pub end_time: i64,
    pub layout_type: LayoutType,
    /// Fraction of container width occupied by the camera, in `(0, 1]`.
    pub camera_size: f64,
    /// Normalized center position of the camera overlay.
    pub camera_position: NormalizedPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutInvalid {
    #[error("layout duration ({duration}ms) is shorter than MIN_LAYOUT_MS ({min}ms)")]
    TooShort { duration: i64, min: i64 },
    #[error("end_time ({end}) must be > start_time ({start})")]
    BackwardsInterval { start: i64, end: i64 },
    #[error("camera_size ({0}) must be in (0, 1]")]
    InvalidCameraSize(f64),
}

impl Layout {
    pub fn new(
        start_time: i64,
        end_time: i64,
        layout_type: LayoutType,
        camera_size: f64,
        camera_position: NormalizedPoint,
    ) -> Result<Self, LayoutInvalid> {
        let layout = Self {
            id: LayoutId::new(),
            start_time,
            end_time,
            layout_type,
            camera_size,
            camera_position,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// A single layout covering `[0, total_output_duration)`, as created for
    /// the default scene of a fresh recording.
    pub fn full_duration(
        total_output_duration: i64,
        layout_type: LayoutType,
    ) -> Result<Self, LayoutInvalid> {
        Self::new(
            0,
            total_output_duration,
            layout_type,
            0.3,
            NormalizedPoint::new(0.82, 0.82),
        )
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }

    pub fn validate(&self) -> Result<(), LayoutInvalid> {
        if self.end_time <= self.start_time {
            return Err(LayoutInvalid::BackwardsInterval {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.duration_ms() < MIN_LAYOUT_MS {
            return Err(LayoutInvalid::TooShort {
                duration: self.duration_ms(),
                min: MIN_LAYOUT_MS,
            });
        }
        if !(self.camera_size > 0.0 && self.camera_size <= 1.0) {
            return Err(LayoutInvalid::InvalidCameraSize(self.camera_size));
        }
        Ok(())
    }

    pub fn contains(&self, t_out: i64) -> bool {
        t_out >= self.start_time && t_out < self.end_time
    }
}
