//! Error handling for the visibility core.
//!
//! The core is fail-soft: every error here means "skip this frame's draw
//! work and retry next tick". Nothing is carried across frames, so there is
//! no recovery logic beyond logging the skip.

/// Reasons a frame's visibility/culling work cannot proceed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CullError {
    #[error("no depth buffer was supplied for this frame")]
    MissingDepth,

    #[error("depth buffer holds {actual} texels but the viewport needs {expected}")]
    DepthSizeMismatch { expected: usize, actual: usize },

    #[error("camera frustum has not been recomputed since the last mutation")]
    FrustumNotReady,

    #[error("view-projection matrix is singular")]
    SingularViewProjection,
}

/// Result type for per-frame culling operations.
pub type CullResult<T> = Result<T, CullError>;
