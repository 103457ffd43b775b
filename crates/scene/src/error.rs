//! Scene error types.

use thiserror::Error;

/// Scene error type.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Construction with a negative width or height.
    #[error("invalid scene dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Dimensions whose square count cannot be allocated.
    #[error("scene of {width}x{height} squares is too large")]
    TooLarge { width: i32, height: i32 },

    /// Coordinate outside `[0, width) x [0, height)`.
    #[error("square ({col}, {row}) is outside the {width}x{height} scene")]
    OutOfBounds {
        col: i32,
        row: i32,
        width: i32,
        height: i32,
    },

    /// Comparison between scenes of different dimensions.
    #[error("cannot compare a {truth_width}x{truth_height} scene with a {candidate_width}x{candidate_height} scene")]
    IncompatibleScenes {
        truth_width: i32,
        truth_height: i32,
        candidate_width: i32,
        candidate_height: i32,
    },

    /// Attempt to place the blind sentinel as an ordinary item.
    #[error("identifier {0:?} is reserved")]
    ReservedIdentifier(String),

    /// Two reserved markers share a value.
    #[error("reserved markers must be distinct: {0}")]
    ConflictingMarkers(String),

    /// Malformed configuration document.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
