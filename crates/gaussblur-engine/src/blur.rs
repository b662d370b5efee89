use gaussblur_plane::{Plane, PlaneRef, PlaneRefMut};

use crate::convolve::{convolve_pass_with_backend, Axis, ConvolveBackend};
use crate::error::FilterError;
use crate::kernel::GaussianKernel;

/// Blur one plane with a separable Gaussian of the given radius.
///
/// Builds the kernel, runs the horizontal pass into a tightly packed
/// intermediate plane, then the vertical pass into `dst`. The kernel and the
/// intermediate buffer belong to exactly this invocation and are dropped on
/// every exit path. The pass order is fixed horizontal-then-vertical for
/// bit-exact reproducibility.
///
/// # Arguments
///
/// * `src` - The source plane view; never written.
/// * `dst` - The destination plane view; a distinct buffer of the same size.
/// * `radius` - Half-width of the Gaussian kernel, at least 1.
pub fn gaussian_blur(
    src: &PlaneRef<'_>,
    dst: &mut PlaneRefMut<'_>,
    radius: usize,
) -> Result<(), FilterError> {
    gaussian_blur_with_backend(src, dst, radius, ConvolveBackend::Auto)
}

/// Same as [`gaussian_blur`] with explicit backend control, for tests and
/// benchmarks that pin the scalar path.
pub fn gaussian_blur_with_backend(
    src: &PlaneRef<'_>,
    dst: &mut PlaneRefMut<'_>,
    radius: usize,
    backend: ConvolveBackend,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(FilterError::SizeMismatch {
            src: src.size(),
            dst: dst.size(),
        });
    }

    let kernel = GaussianKernel::new(radius)?;
    let mut tmp = Plane::from_size_val(src.size(), 0)?;

    convolve_pass_with_backend(src, &mut tmp.view_mut(), Axis::Horizontal, &kernel, backend)?;
    convolve_pass_with_backend(&tmp.view(), dst, Axis::Vertical, &kernel, backend)?;

    Ok(())
}
