#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// two-pass gaussian blur entry points.
pub mod blur;

/// separable 1D convolution passes.
pub mod convolve;

/// Error types for the engine.
pub mod error;

/// host-facing filter instance.
pub mod filter;

/// gaussian kernel construction.
pub mod kernel;

mod simd;

pub use crate::blur::{gaussian_blur, gaussian_blur_with_backend};
pub use crate::convolve::{convolve_pass, convolve_pass_with_backend, Axis, ConvolveBackend};
pub use crate::error::FilterError;
pub use crate::filter::{GaussianBlur, SampleType, VideoFormat};
pub use crate::kernel::GaussianKernel;
