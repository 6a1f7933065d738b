//! Cursor Smoother: a per-axis critically-damped spring that chases the
//! raw target point.
//!
//! Motion is integrated in continuous time (semi-implicit Euler) and
//! sampled as the Playback Clock advances, so it is frame-rate independent.
//! The Resolver owns one [`CursorSmoother`] per playback session and is
//! responsible for calling [`CursorSmoother::reset`] at the mandatory
//! reset points.

use reeltime_project_model::CursorId;
use tracing::debug;

/// Spring constants for the integrator (defaults: `k=470, c=70, m=3`,
/// giving `ζ ≈ 0.93`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

impl SpringParams {
    /// Natural frequency `ω = √(k/m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2√(k·m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// The position/cursor-image output of one smoother step.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedPoint {
    pub x: f64,
    pub y: f64,
    pub raw_x: f64,
    pub raw_y: f64,
    pub cursor_id: CursorId,
}

/// The maximum timestep, in seconds, the integrator accepts in one call;
/// larger deltas (tab-hiding stalls) are clamped.
pub const MAX_DT_SECS: f64 = 0.1;

/// A critically-damped spring tracking a 2D raw target.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    params: SpringParams,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    cursor_id: CursorId,
}

impl CursorSmoother {
    /// Create a smoother at rest at `(x, y)` with the given spring
    /// parameters.
    pub fn new(params: SpringParams, x: f64, y: f64, cursor_id: CursorId) -> Self {
        Self {
            params,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            cursor_id,
        }
    }

    /// Create a smoother at rest at the origin with default spring
    /// parameters and no known cursor image yet.
    pub fn at_rest(cursor_id: CursorId) -> Self {
        Self::new(SpringParams::default(), 0.0, 0.0, cursor_id)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn cursor_id(&self) -> &CursorId {
        &self.cursor_id
    }

    /// Snaps position, zeroes velocity. Required on every seek, playback
    /// start, cursor-image change, and slice-boundary crossing during
    /// playback.
    pub fn reset(&mut self, x: f64, y: f64, cursor_id: CursorId) {
        debug!(x, y, cursor_id = ?cursor_id, "cursor smoother reset");
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.cursor_id = cursor_id;
    }

    /// Advance the spring toward `(target_x, target_y)` by `dt` seconds
    /// (clamped to `[0, MAX_DT_SECS]`), using semi-implicit Euler:
    /// `a = (k·(target − p) − c·v) / m`, `v' = v + a·dt`, `p' = p + v'·dt`.
    /// `dt = 0` is a no-op on velocity and returns the current position
    /// unchanged — used for "apply to current time" on pause/seek.
    pub fn step(&mut self, target_x: f64, target_y: f64, dt: f64, cursor_id: CursorId) -> SmoothedPoint {
        let dt = dt.clamp(0.0, MAX_DT_SECS);

        if cursor_id != self.cursor_id {
            self.reset(target_x, target_y, cursor_id);
        } else if dt > 0.0 {
            let ax = (self.params.stiffness * (target_x - self.x) - self.params.damping * self.vx)
                / self.params.mass;
            let ay = (self.params.stiffness * (target_y - self.y) - self.params.damping * self.vy)
                / self.params.mass;
            self.vx += ax * dt;
            self.vy += ay * dt;
            self.x += self.vx * dt;
            self.y += self.vy * dt;
        }

        SmoothedPoint {
            x: self.x,
            y: self.y,
            raw_x: target_x,
            raw_y: target_y,
            cursor_id: self.cursor_id.clone(),
        }
    }
}
