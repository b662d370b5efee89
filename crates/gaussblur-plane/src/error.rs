/// An error type for the plane module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PlaneError {
    /// Error when a plane dimension is zero.
    #[error("Plane dimensions must be non-zero, got {0}x{1}")]
    InvalidDimensions(usize, usize),

    /// Error when the row stride is smaller than the plane width.
    #[error("Row stride ({0}) must be at least the plane width ({1})")]
    InvalidStride(usize, usize),

    /// Error when a borrowed buffer cannot hold the described plane.
    #[error("Buffer length ({0}) is smaller than the plane requires ({1})")]
    BufferTooSmall(usize, usize),

    /// Error when owned data does not match the plane size.
    #[error("Data length ({0}) does not match the plane size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the allocator cannot provide the requested storage.
    #[error("Failed to allocate storage for {0} samples")]
    OutOfMemory(usize),
}
