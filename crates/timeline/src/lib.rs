//! reeltime Timeline
//!
//! The Time Algebra and Edit Model: pure slice-time functions,
//! invariant-enforcing mutation operations over a
//! [`reeltime_project_model::Project`], snapshot publishing with change
//! notification, and the Edit Decision List export consumed by an exporter
//! collaborator.

pub mod algebra;
pub mod edit;
pub mod edl;

pub use algebra::*;
pub use edit::{EditModel, LayoutPatch, ProjectChanged, Track};
pub use edl::{project_edl, scene_edl, EdlEntry};
