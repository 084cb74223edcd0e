//! AVX2 color decoding
//!
//! Eight characters go into eight 16-bit lanes of an SSE register, get
//! turned into nibbles, widen to eight 32-bit lanes of an AVX register,
//! shift into place with `vpsllvd` and collapse with a horizontal sum.
//!
//! Two ways to get from characters to nibbles:
//! - arithmetic: compare/mask/subtract, the vector form of
//!   [`nibble::from_arith`](crate::nibble::from_arith)
//! - gather: `vpgatherdd` straight out of the process-wide hex table
//!
//! Every `unsafe fn` here requires AVX2; callers check
//! [`has_avx2`](super::has_avx2) first.

use super::{LaneBlock, RGB_LANE_MASK};
use crate::nibble::{self, CASE_FOLD, LETTER_GAP};
use crate::{ALPHA_OPAQUE, LANE_SHIFTS};
use std::arch::x86_64::*;

/// Arithmetic strategy, `RRGGBB`
#[target_feature(enable = "avx2")]
pub(super) unsafe fn decode_rgb_arith(hex: &[u8; 6]) -> u32 {
    unsafe {
        let chars = load_lanes(&LaneBlock::rgb(hex));
        let nibbles = _mm_and_si128(nibbles_arith(chars), rgb_lane_mask());
        ALPHA_OPAQUE | place_and_sum(nibbles)
    }
}

/// Arithmetic strategy, `RRGGBBAA`
#[target_feature(enable = "avx2")]
pub(super) unsafe fn decode_rgba_arith(hex: &[u8; 8]) -> u32 {
    unsafe {
        let chars = load_lanes(&LaneBlock::rgba(hex));
        place_and_sum(nibbles_arith(chars))
    }
}

/// Gather strategy, `RRGGBB`
///
/// Padding lanes are zeroed before the gather so they read entry 0.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn decode_rgb_gather(hex: &[u8; 6]) -> u32 {
    unsafe {
        let chars = _mm_and_si128(load_lanes(&LaneBlock::rgb(hex)), rgb_lane_mask());
        ALPHA_OPAQUE | horizontal_sum(_mm256_sllv_epi32(gather_nibbles(chars), lane_shifts()))
    }
}

/// Gather strategy, `RRGGBBAA`
#[target_feature(enable = "avx2")]
pub(super) unsafe fn decode_rgba_gather(hex: &[u8; 8]) -> u32 {
    unsafe {
        let chars = load_lanes(&LaneBlock::rgba(hex));
        horizontal_sum(_mm256_sllv_epi32(gather_nibbles(chars), lane_shifts()))
    }
}

/// Zero-extend eight bytes into eight 16-bit lanes
#[target_feature(enable = "avx2")]
unsafe fn load_lanes(block: &LaneBlock) -> __m128i {
    unsafe {
        // movq reads exactly 8 bytes, the size of the block
        let bytes = _mm_loadl_epi64(block.0.as_ptr() as *const __m128i);
        _mm_cvtepu8_epi16(bytes)
    }
}

#[target_feature(enable = "avx2")]
unsafe fn rgb_lane_mask() -> __m128i {
    unsafe { _mm_loadu_si128(RGB_LANE_MASK.as_ptr() as *const __m128i) }
}

#[target_feature(enable = "avx2")]
unsafe fn lane_shifts() -> __m256i {
    unsafe { _mm256_loadu_si256(LANE_SHIFTS.as_ptr() as *const __m256i) }
}

/// Character lanes to nibble lanes without branching
///
/// Lanes hold zero-extended bytes, so the signed 16-bit compares are exact.
#[target_feature(enable = "avx2")]
unsafe fn nibbles_arith(chars: __m128i) -> __m128i {
    let is_lower = _mm_cmpgt_epi16(chars, _mm_set1_epi16(b'F' as i16));
    let is_letter = _mm_cmpgt_epi16(chars, _mm_set1_epi16(b'9' as i16));

    let fold = _mm_and_si128(is_lower, _mm_set1_epi16(CASE_FOLD as i16));
    let gap = _mm_and_si128(is_letter, _mm_set1_epi16(LETTER_GAP as i16));
    let letters_folded = _mm_sub_epi16(_mm_sub_epi16(chars, fold), gap);
    let values = _mm_sub_epi16(letters_folded, _mm_set1_epi16(b'0' as i16));

    _mm_and_si128(values, _mm_set1_epi16(0x0F))
}

/// Gather one table entry per lane; indices are clamped to the table
#[target_feature(enable = "avx2")]
unsafe fn gather_nibbles(chars: __m128i) -> __m256i {
    unsafe {
        let indices = _mm256_cvtepu16_epi32(_mm_and_si128(chars, _mm_set1_epi16(0x7F)));
        _mm256_i32gather_epi32(nibble::table().as_ptr() as *const i32, indices, 4)
    }
}

/// Widen nibble lanes to 32 bits, shift each to its output position, sum
#[target_feature(enable = "avx2")]
unsafe fn place_and_sum(nibbles: __m128i) -> u32 {
    unsafe {
        let wide = _mm256_cvtepu16_epi32(nibbles);
        horizontal_sum(_mm256_sllv_epi32(wide, lane_shifts()))
    }
}

/// Sum all eight 32-bit lanes. Lanes never share bits, so this is also their OR.
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum(lanes: __m256i) -> u32 {
    let folded = _mm_add_epi32(
        _mm256_castsi256_si128(lanes),
        _mm256_extracti128_si256(lanes, 1),
    );
    let pairs = _mm_hadd_epi32(folded, folded);
    let total = _mm_hadd_epi32(pairs, pairs);
    _mm_cvtsi128_si32(total) as u32
}
