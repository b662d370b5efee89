use gaussblur_plane::{PlaneRef, PlaneRefMut};

use crate::error::FilterError;
use crate::kernel::GaussianKernel;
use crate::simd;

/// The axis a 1D convolution pass runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Taps move across columns within each row.
    Horizontal,
    /// Taps move across rows within each column.
    Vertical,
}

/// Selects the implementation of a convolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveBackend {
    /// Use the vectorized path when the platform provides one.
    ///
    /// Results stay within ±1 LSB of the scalar path; the vector body
    /// accumulates in `f32` against the scalar `f64`.
    #[default]
    Auto,
    /// Force the scalar double-precision path.
    Scalar,
}

/// Clamp-to-edge index rule shared by both passes: out-of-range tap
/// positions resolve to the nearest edge sample.
#[inline]
pub(crate) fn clamp_index(pos: isize, extent: usize) -> usize {
    pos.clamp(0, extent as isize - 1) as usize
}

/// Clamp to the sample range, then round half up.
#[inline]
fn quantize(acc: f64) -> u16 {
    (acc.clamp(0.0, 65535.0) + 0.5) as u16
}

#[inline]
fn convolve_sample(src_row: &[u16], x: usize, weights: &[f64], radius: usize) -> u16 {
    let width = src_row.len();
    let mut acc = 0.0;
    for (k, &w) in weights.iter().enumerate() {
        let xx = clamp_index(x as isize + k as isize - radius as isize, width);
        acc += f64::from(src_row[xx]) * w;
    }
    quantize(acc)
}

fn convolve_row_scalar(src_row: &[u16], dst_row: &mut [u16], weights: &[f64], radius: usize) {
    for (x, out) in dst_row.iter_mut().enumerate() {
        *out = convolve_sample(src_row, x, weights, radius);
    }
}

/// The first and last `radius` columns of a row, where taps clamp.
fn convolve_row_edges(src_row: &[u16], dst_row: &mut [u16], weights: &[f64], radius: usize) {
    let width = dst_row.len();
    for x in 0..radius {
        dst_row[x] = convolve_sample(src_row, x, weights, radius);
    }
    for x in width - radius..width {
        dst_row[x] = convolve_sample(src_row, x, weights, radius);
    }
}

fn convolve_col_scalar(
    src: &PlaneRef<'_>,
    dst_row: &mut [u16],
    y: usize,
    weights: &[f64],
    radius: usize,
) {
    let height = src.height();
    for (x, out) in dst_row.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &w) in weights.iter().enumerate() {
            let yy = clamp_index(y as isize + k as isize - radius as isize, height);
            acc += f64::from(src.row(yy)[x]) * w;
        }
        *out = quantize(acc);
    }
}

/// Apply one 1D convolution pass along an axis.
///
/// For every output position the pass accumulates `kernel.len()` taps of the
/// source, clamping tap positions to the plane edge, then clamps the sum to
/// `[0, 65535]` and rounds half up before storing. The source is never
/// written; the destination must be a distinct buffer of the same size.
///
/// # Arguments
///
/// * `src` - The source plane view.
/// * `dst` - The destination plane view, same size as `src`.
/// * `axis` - The axis the taps move along.
/// * `kernel` - The normalized kernel to apply.
pub fn convolve_pass(
    src: &PlaneRef<'_>,
    dst: &mut PlaneRefMut<'_>,
    axis: Axis,
    kernel: &GaussianKernel,
) -> Result<(), FilterError> {
    convolve_pass_with_backend(src, dst, axis, kernel, ConvolveBackend::Auto)
}

/// Same as [`convolve_pass`] with explicit backend control.
///
/// `ConvolveBackend::Scalar` pins the double-precision reference path; tests
/// and benchmarks use it to compare against the vectorized path.
pub fn convolve_pass_with_backend(
    src: &PlaneRef<'_>,
    dst: &mut PlaneRefMut<'_>,
    axis: Axis,
    kernel: &GaussianKernel,
    backend: ConvolveBackend,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(FilterError::SizeMismatch {
            src: src.size(),
            dst: dst.size(),
        });
    }

    let radius = kernel.radius();
    let weights = kernel.weights();
    let width = src.width();
    let height = src.height();

    let vectorize = backend == ConvolveBackend::Auto && simd::available();

    match axis {
        Axis::Horizontal => {
            // the vector body needs a span of columns whose taps are all in range
            if vectorize && width >= 2 * radius + simd::LANES {
                let weights32 = kernel.weights_f32();
                for y in 0..height {
                    let src_row = src.row(y);
                    let dst_row = dst.row_mut(y);
                    convolve_row_edges(src_row, dst_row, weights, radius);
                    simd::convolve_row_interior(src_row, dst_row, &weights32, radius);
                }
            } else {
                for y in 0..height {
                    convolve_row_scalar(src.row(y), dst.row_mut(y), weights, radius);
                }
            }
        }
        Axis::Vertical => {
            // the clamped row index is uniform across lanes, so every row vectorizes
            if vectorize && width >= simd::LANES {
                let weights32 = kernel.weights_f32();
                for y in 0..height {
                    simd::convolve_col(
                        src.as_slice(),
                        src.stride(),
                        height,
                        y,
                        dst.row_mut(y),
                        &weights32,
                        radius,
                    );
                }
            } else {
                for y in 0..height {
                    convolve_col_scalar(src, dst.row_mut(y), y, weights, radius);
                }
            }
        }
    }

    Ok(())
}
