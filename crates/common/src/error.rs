//! Error taxonomy shared across reeltime crates.
//!
//! The variants mirror the failure kinds the engine must distinguish at the
//! command boundary: invariant refusals and not-found lookups are always
//! non-fatal and leave the prior snapshot untouched.

/// Top-level error type for reeltime operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("bundle invalid: {message}")]
    BundleInvalid { message: String },

    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("not found: {kind} {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("out of range: {message}")]
    OutOfRange { message: String },

    #[error("cancelled")]
    Cancelled,

    #[error("media drift of {drift_ms}ms exceeds the {threshold_ms}ms resync threshold")]
    MediaDrift { drift_ms: i64, threshold_ms: i64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn bundle_invalid(msg: impl Into<String>) -> Self {
        Self::BundleInvalid {
            message: msg.into(),
        }
    }

    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: msg.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: msg.into(),
        }
    }

    /// Whether this error reflects a refused-but-harmless mutation: the
    /// caller's snapshot is stale or the request was malformed, not that
    /// the engine itself failed.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation { .. } | Self::NotFound { .. } | Self::OutOfRange { .. }
        )
    }
}
