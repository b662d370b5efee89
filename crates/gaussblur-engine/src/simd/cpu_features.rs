//! CPU feature detection for run-time SIMD dispatch.
//!
//! Detection runs once and is cached; use this helper instead of calling
//! `is_x86_feature_detected!` from hot loops.

use std::sync::OnceLock;

static SSE41: OnceLock<bool> = OnceLock::new();

/// Check if SSE4.1 is available.
#[inline]
pub(crate) fn has_sse41() -> bool {
    *SSE41.get_or_init(|| is_x86_feature_detected!("sse4.1"))
}
