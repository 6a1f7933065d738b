//! reeltime Cursor
//!
//! The Input-Event Index and the Cursor Smoother: the two components that,
//! given raw recorded input and an output-synced source time, produce the
//! smoothed on-screen cursor position the Resolver publishes each tick.

pub mod event_index;
pub mod smoother;

pub use event_index::{InputEventIndex, InterpolatedPoint, RecentClick};
pub use smoother::{CursorSmoother, SmoothedPoint, SpringParams, MAX_DT_SECS};
