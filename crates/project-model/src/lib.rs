//! reeltime Project Model
//!
//! Defines the core data contracts for the non-linear timeline engine:
//! - **Project / Scene:** the authoritative editing tree
//! - **Slice / Layout:** the atomic units of non-destructive editing
//! - **RecordingBundle:** the read-only recording the engine edits
//! - **Event samples:** mouse-move and mouse-click data from the bundle
//! - **Ids:** opaque, never-reused identifiers
//!
//! This crate carries no behavior over multiple slices/layouts at once —
//! cross-sequence invariants (layout coverage, total duration, track
//! linking) and the Edit Model's mutation operations live in
//! `reeltime-timeline`, which depends on these types.

pub mod bundle;
pub mod event;
pub mod ids;
pub mod layout;
pub mod project;
pub mod scene;
pub mod slice;

pub use bundle::*;
pub use event::*;
pub use ids::*;
pub use layout::*;
pub use project::*;
pub use scene::*;
pub use slice::*;
