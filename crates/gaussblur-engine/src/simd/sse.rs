//! x86_64 SSE4.1 bodies for the convolution passes.
//!
//! Counterpart of the NEON module: eight output samples per step, u16→f32
//! widening per tap, multiply-accumulate, then `+0.5`, truncating conversion
//! and saturating pack back to `u16`.

use std::arch::x86_64::*;

use super::quantize_f32;
use crate::convolve::clamp_index;

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn accumulate_tap(
    acc_lo: __m128,
    acc_hi: __m128,
    v: __m128i,
    w: f32,
) -> (__m128, __m128) {
    unsafe {
        let lo = _mm_cvtepi32_ps(_mm_cvtepu16_epi32(v));
        let hi = _mm_cvtepi32_ps(_mm_cvtepu16_epi32(_mm_srli_si128(v, 8)));
        let wv = _mm_set1_ps(w);
        (
            _mm_add_ps(acc_lo, _mm_mul_ps(lo, wv)),
            _mm_add_ps(acc_hi, _mm_mul_ps(hi, wv)),
        )
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn pack_store(dst: *mut u16, acc_lo: __m128, acc_hi: __m128) {
    unsafe {
        let half = _mm_set1_ps(0.5);
        let lo_i = _mm_cvttps_epi32(_mm_add_ps(acc_lo, half));
        let hi_i = _mm_cvttps_epi32(_mm_add_ps(acc_hi, half));
        _mm_storeu_si128(dst as *mut __m128i, _mm_packus_epi32(lo_i, hi_i));
    }
}

/// Horizontal interior span of one row.
///
/// # Safety
///
/// Requires SSE4.1. `src_row` and `dst_row` must both be `width` samples long
/// with `width >= 2 * radius + 8`, so every tap of every vector column is in
/// range.
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn convolve_row_interior_sse41(
    src_row: &[u16],
    dst_row: &mut [u16],
    weights: &[f32],
    radius: usize,
) {
    unsafe {
        let width = dst_row.len();
        let src_ptr = src_row.as_ptr();
        let dst_ptr = dst_row.as_mut_ptr();

        let last = width - radius;
        let mut x = radius;
        while x + 8 <= last {
            let mut acc_lo = _mm_setzero_ps();
            let mut acc_hi = _mm_setzero_ps();

            for (k, &w) in weights.iter().enumerate() {
                let v = _mm_loadu_si128(src_ptr.add(x + k - radius) as *const __m128i);
                (acc_lo, acc_hi) = accumulate_tap(acc_lo, acc_hi, v, w);
            }

            pack_store(dst_ptr.add(x), acc_lo, acc_hi);
            x += 8;
        }

        // remainder of the interior span
        while x < last {
            let mut acc = 0.0f32;
            for (k, &w) in weights.iter().enumerate() {
                acc += f32::from(src_row[x + k - radius]) * w;
            }
            dst_row[x] = quantize_f32(acc);
            x += 1;
        }
    }
}

/// One full output row of the vertical pass.
///
/// # Safety
///
/// Requires SSE4.1. `src` must hold at least `stride * (height - 1) + width`
/// samples where `width` is `dst_row.len()` and `stride >= width`; `y` must
/// be below `height`.
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn convolve_col_sse41(
    src: &[u16],
    stride: usize,
    height: usize,
    y: usize,
    dst_row: &mut [u16],
    weights: &[f32],
    radius: usize,
) {
    unsafe {
        let width = dst_row.len();
        let src_ptr = src.as_ptr();
        let dst_ptr = dst_row.as_mut_ptr();

        let mut x = 0;
        while x + 8 <= width {
            let mut acc_lo = _mm_setzero_ps();
            let mut acc_hi = _mm_setzero_ps();

            for (k, &w) in weights.iter().enumerate() {
                let yy = clamp_index(y as isize + k as isize - radius as isize, height);
                let v = _mm_loadu_si128(src_ptr.add(yy * stride + x) as *const __m128i);
                (acc_lo, acc_hi) = accumulate_tap(acc_lo, acc_hi, v, w);
            }

            pack_store(dst_ptr.add(x), acc_lo, acc_hi);
            x += 8;
        }

        // column tail
        while x < width {
            let mut acc = 0.0f32;
            for (k, &w) in weights.iter().enumerate() {
                let yy = clamp_index(y as isize + k as isize - radius as isize, height);
                acc += f32::from(src[yy * stride + x]) * w;
            }
            dst_row[x] = quantize_f32(acc);
            x += 1;
        }
    }
}
