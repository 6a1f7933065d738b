//! Opaque, globally-unique identifiers.
//!
//! IDs are 128-bit UUIDv4 values. Nothing outside this module is allowed to
//! assume anything about their internal structure — they are generated once
//! at creation and never reissued after deletion.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh, never-before-issued ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id!(ProjectId, "Identifies a [`crate::project::Project`].");
opaque_id!(SceneId, "Identifies a [`crate::scene::Scene`].");
opaque_id!(SliceId, "Identifies a [`crate::slice::Slice`].");
opaque_id!(LayoutId, "Identifies a [`crate::layout::Layout`].");
opaque_id!(ZoomRangeId, "Identifies a [`crate::scene::ZoomRange`].");
