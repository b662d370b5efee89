//! Run-time dispatched vector bodies for the convolution passes.
//!
//! Dispatches to SSE4.1 on x86_64 and NEON on aarch64, with a scalar body on
//! other platforms. The vector paths accumulate in `f32` against the scalar
//! path's `f64`; outputs agree within ±1 LSB, asserted by the equivalence
//! tests in `tests/blur.rs`.

use crate::convolve::clamp_index;

#[cfg(target_arch = "x86_64")]
mod cpu_features;

#[cfg(target_arch = "aarch64")]
mod neon;

#[cfg(target_arch = "x86_64")]
mod sse;

/// Output samples each vector step produces.
pub(crate) const LANES: usize = 8;

/// Whether a vector backend is available at run time.
#[inline]
pub(crate) fn available() -> bool {
    #[cfg(target_arch = "x86_64")]
    return cpu_features::has_sse41();

    #[cfg(target_arch = "aarch64")]
    return true;

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    return false;
}

/// Clamp to the sample range, then round half up; `f32` twin of the scalar
/// store rule.
#[inline]
pub(crate) fn quantize_f32(acc: f32) -> u16 {
    (acc.clamp(0.0, 65535.0) + 0.5) as u16
}

/// Convolve the interior columns `[radius, width - radius)` of one row.
///
/// Every tap inside this span is in range, so no boundary handling happens
/// here; the caller computes the clamped edge columns. Requires
/// `width >= 2 * radius + LANES`.
#[inline]
pub(crate) fn convolve_row_interior(
    src_row: &[u16],
    dst_row: &mut [u16],
    weights: &[f32],
    radius: usize,
) {
    #[cfg(target_arch = "x86_64")]
    if cpu_features::has_sse41() {
        unsafe { sse::convolve_row_interior_sse41(src_row, dst_row, weights, radius) };
        return;
    }

    #[cfg(target_arch = "aarch64")]
    {
        unsafe { neon::convolve_row_interior_neon(src_row, dst_row, weights, radius) };
        return;
    }

    // Scalar body for platforms without a vector backend.
    #[allow(unreachable_code)]
    {
        let width = dst_row.len();
        for x in radius..width - radius {
            let mut acc = 0.0f32;
            for (k, &w) in weights.iter().enumerate() {
                acc += f32::from(src_row[x + k - radius]) * w;
            }
            dst_row[x] = quantize_f32(acc);
        }
    }
}

/// Convolve one full output row of the vertical pass.
///
/// The clamped source row index is uniform across lanes, so the vector body
/// covers every column; the `width mod LANES` tail is computed in scalar
/// `f32`. `src` is the full source buffer including stride padding.
#[inline]
pub(crate) fn convolve_col(
    src: &[u16],
    stride: usize,
    height: usize,
    y: usize,
    dst_row: &mut [u16],
    weights: &[f32],
    radius: usize,
) {
    #[cfg(target_arch = "x86_64")]
    if cpu_features::has_sse41() {
        unsafe { sse::convolve_col_sse41(src, stride, height, y, dst_row, weights, radius) };
        return;
    }

    #[cfg(target_arch = "aarch64")]
    {
        unsafe { neon::convolve_col_neon(src, stride, height, y, dst_row, weights, radius) };
        return;
    }

    // Scalar body for platforms without a vector backend.
    #[allow(unreachable_code)]
    for (x, out) in dst_row.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &w) in weights.iter().enumerate() {
            let yy = clamp_index(y as isize + k as isize - radius as isize, height);
            acc += f32::from(src[yy * stride + x]) * w;
        }
        *out = quantize_f32(acc);
    }
}
