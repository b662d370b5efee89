//! aarch64 NEON bodies for the convolution passes.
//!
//! Eight output samples per step: each tap widens `u16x8` to two `f32x4`
//! halves and multiply-accumulates the tap weight; the store path adds 0.5,
//! truncates to `u32` and narrows to `u16` with saturation, matching the
//! scalar round-half-up rule.

use std::arch::aarch64::*;

use super::quantize_f32;
use crate::convolve::clamp_index;

/// Horizontal interior span of one row.
///
/// # Safety
///
/// `src_row` and `dst_row` must both be `width` samples long with
/// `width >= 2 * radius + 8`, so every tap of every vector column is in
/// range.
#[target_feature(enable = "neon")]
pub(super) unsafe fn convolve_row_interior_neon(
    src_row: &[u16],
    dst_row: &mut [u16],
    weights: &[f32],
    radius: usize,
) {
    unsafe {
        let width = dst_row.len();
        let src_ptr = src_row.as_ptr();
        let dst_ptr = dst_row.as_mut_ptr();
        let half = vdupq_n_f32(0.5);

        let last = width - radius;
        let mut x = radius;
        while x + 8 <= last {
            let mut acc_lo = vdupq_n_f32(0.0);
            let mut acc_hi = vdupq_n_f32(0.0);

            for (k, &w) in weights.iter().enumerate() {
                let v = vld1q_u16(src_ptr.add(x + k - radius));
                let lo = vcvtq_f32_u32(vmovl_u16(vget_low_u16(v)));
                let hi = vcvtq_f32_u32(vmovl_u16(vget_high_u16(v)));
                acc_lo = vmlaq_n_f32(acc_lo, lo, w);
                acc_hi = vmlaq_n_f32(acc_hi, hi, w);
            }

            let out = vcombine_u16(
                vqmovn_u32(vcvtq_u32_f32(vaddq_f32(acc_lo, half))),
                vqmovn_u32(vcvtq_u32_f32(vaddq_f32(acc_hi, half))),
            );
            vst1q_u16(dst_ptr.add(x), out);
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
/// `src` must hold at least `stride * (height - 1) + width` samples where
/// `width` is `dst_row.len()` and `stride >= width`; `y` must be below
/// `height`.
#[target_feature(enable = "neon")]
pub(super) unsafe fn convolve_col_neon(
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
        let half = vdupq_n_f32(0.5);

        let mut x = 0;
        while x + 8 <= width {
            let mut acc_lo = vdupq_n_f32(0.0);
            let mut acc_hi = vdupq_n_f32(0.0);

            for (k, &w) in weights.iter().enumerate() {
                let yy = clamp_index(y as isize + k as isize - radius as isize, height);
                let v = vld1q_u16(src_ptr.add(yy * stride + x));
                let lo = vcvtq_f32_u32(vmovl_u16(vget_low_u16(v)));
                let hi = vcvtq_f32_u32(vmovl_u16(vget_high_u16(v)));
                acc_lo = vmlaq_n_f32(acc_lo, lo, w);
                acc_hi = vmlaq_n_f32(acc_hi, hi, w);
            }

            let out = vcombine_u16(
                vqmovn_u32(vcvtq_u32_f32(vaddq_f32(acc_lo, half))),
                vqmovn_u32(vcvtq_u32_f32(vaddq_f32(acc_hi, half))),
            );
            vst1q_u16(dst_ptr.add(x), out);
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
