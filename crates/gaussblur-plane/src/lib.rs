#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// planar buffer representation for video processing purposes.
pub mod plane;

/// Error types for the plane module.
pub mod error;

pub use crate::error::PlaneError;
pub use crate::plane::{Plane, PlaneRef, PlaneRefMut, PlaneSize};
