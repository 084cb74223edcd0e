//! SIMD-accelerated color decoding
//!
//! This module provides platform-specific vector backends. CPU feature
//! detection runs once and is cached; the dispatcher only ever receives
//! kernels for a backend the current CPU can run.
//!
//! Loads never reach outside the caller's array. Six-character input is
//! copied into a zeroed eight-byte [`LaneBlock`] and the two trailing lanes
//! are masked out, instead of reading two bytes in front of the slice.

use crate::dispatch::Kernels;
#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod x86_64;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod aarch64;

// CPU feature detection cache
#[cfg(target_arch = "x86_64")]
static HAS_AVX2: OnceLock<bool> = OnceLock::new();

/// Check if AVX2 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub fn has_avx2() -> bool {
    *HAS_AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_avx2() -> bool {
    false
}

/// Check if NEON is available (mandatory on aarch64)
pub fn has_neon() -> bool {
    cfg!(target_arch = "aarch64")
}

/// Eight characters laid out for an 8-lane load; RGB leaves the last two zero
#[cfg_attr(not(feature = "simd"), allow(dead_code))]
pub(crate) struct LaneBlock(pub(crate) [u8; 8]);

#[cfg_attr(not(feature = "simd"), allow(dead_code))]
impl LaneBlock {
    #[inline(always)]
    pub(crate) fn rgb(hex: &[u8; 6]) -> Self {
        let mut block = [0u8; 8];
        block[..6].copy_from_slice(hex);
        LaneBlock(block)
    }

    #[inline(always)]
    pub(crate) fn rgba(hex: &[u8; 8]) -> Self {
        LaneBlock(*hex)
    }
}

/// Keeps lanes 0-5, clears the two padding lanes of the RGB layout
#[cfg_attr(not(feature = "simd"), allow(dead_code))]
pub(crate) const RGB_LANE_MASK: [u16; 8] = [0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0, 0];

/// Kernels for the arithmetic classification strategy, if this CPU has one
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) fn arith_kernels() -> Option<Kernels> {
    fn rgb(hex: &[u8; 6]) -> u32 {
        // SAFETY: only handed out after has_avx2() returned true
        unsafe { x86_64::decode_rgb_arith(hex) }
    }
    fn rgba(hex: &[u8; 8]) -> u32 {
        // SAFETY: as above
        unsafe { x86_64::decode_rgba_arith(hex) }
    }

    has_avx2().then_some(Kernels { rgb, rgba })
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
pub(crate) fn arith_kernels() -> Option<Kernels> {
    fn rgb(hex: &[u8; 6]) -> u32 {
        // SAFETY: NEON is mandatory on aarch64
        unsafe { aarch64::decode_rgb(hex) }
    }
    fn rgba(hex: &[u8; 8]) -> u32 {
        // SAFETY: NEON is mandatory on aarch64
        unsafe { aarch64::decode_rgba(hex) }
    }

    has_neon().then_some(Kernels { rgb, rgba })
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
pub(crate) fn arith_kernels() -> Option<Kernels> {
    None
}

/// Kernels for the table-gather strategy (AVX2 only)
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) fn gather_kernels() -> Option<Kernels> {
    fn rgb(hex: &[u8; 6]) -> u32 {
        // SAFETY: only handed out after has_avx2() returned true
        unsafe { x86_64::decode_rgb_gather(hex) }
    }
    fn rgba(hex: &[u8; 8]) -> u32 {
        // SAFETY: as above
        unsafe { x86_64::decode_rgba_gather(hex) }
    }

    has_avx2().then_some(Kernels { rgb, rgba })
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
pub(crate) fn gather_kernels() -> Option<Kernels> {
    None
}
