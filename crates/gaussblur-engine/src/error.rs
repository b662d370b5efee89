use gaussblur_plane::{PlaneError, PlaneSize};

use crate::filter::VideoFormat;

/// An error type for the blur engine and its filter-instance layer.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    /// Error when the radius parameter is below the supported minimum.
    #[error("'radius' must be greater than 0, got {0}")]
    InvalidRadius(i64),

    /// Error when the input format is not constant 16-bit integer.
    #[error("Only constant format 16-bit integer input supported, got {0}")]
    UnsupportedFormat(VideoFormat),

    /// Error when source and destination plane sizes differ.
    #[error("Source plane {src} does not match destination plane {dst}")]
    SizeMismatch {
        /// Size of the source plane.
        src: PlaneSize,
        /// Size of the destination plane.
        dst: PlaneSize,
    },

    /// Error when kernel storage cannot be allocated.
    #[error("Failed to allocate kernel storage for {0} taps")]
    OutOfMemory(usize),

    /// Error from the underlying plane buffers.
    #[error(transparent)]
    Plane(#[from] PlaneError),
}
