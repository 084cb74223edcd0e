//! NEON color decoding
//!
//! Same lane layout as the AVX2 backend: eight 16-bit character lanes,
//! widened into two 4x32-bit halves, shifted with `vshlq_u32` and summed
//! with `vaddvq_u32`. NEON has no gather, so only the arithmetic strategy
//! exists here.

use super::{LaneBlock, RGB_LANE_MASK};
use crate::nibble::{CASE_FOLD, LETTER_GAP};
use crate::ALPHA_OPAQUE;
use std::arch::aarch64::*;

/// `LANE_SHIFTS` as the signed counts `vshlq_u32` takes
const SIGNED_SHIFTS: [i32; 8] = [20, 16, 12, 8, 4, 0, 28, 24];

#[target_feature(enable = "neon")]
pub(super) unsafe fn decode_rgb(hex: &[u8; 6]) -> u32 {
    unsafe {
        let chars = load_lanes(&LaneBlock::rgb(hex));
        let nibbles = vandq_u16(nibbles_arith(chars), vld1q_u16(RGB_LANE_MASK.as_ptr()));
        ALPHA_OPAQUE | place_and_sum(nibbles)
    }
}

#[target_feature(enable = "neon")]
pub(super) unsafe fn decode_rgba(hex: &[u8; 8]) -> u32 {
    unsafe {
        let chars = load_lanes(&LaneBlock::rgba(hex));
        place_and_sum(nibbles_arith(chars))
    }
}

#[target_feature(enable = "neon")]
unsafe fn load_lanes(block: &LaneBlock) -> uint16x8_t {
    unsafe { vmovl_u8(vld1_u8(block.0.as_ptr())) }
}

#[target_feature(enable = "neon")]
unsafe fn nibbles_arith(chars: uint16x8_t) -> uint16x8_t {
    unsafe {
        let is_lower = vcgtq_u16(chars, vdupq_n_u16(b'F' as u16));
        let is_letter = vcgtq_u16(chars, vdupq_n_u16(b'9' as u16));

        let folded = vsubq_u16(chars, vandq_u16(is_lower, vdupq_n_u16(CASE_FOLD as u16)));
        let shifted = vsubq_u16(folded, vandq_u16(is_letter, vdupq_n_u16(LETTER_GAP as u16)));
        let values = vsubq_u16(shifted, vdupq_n_u16(b'0' as u16));

        vandq_u16(values, vdupq_n_u16(0x0F))
    }
}

#[target_feature(enable = "neon")]
unsafe fn place_and_sum(nibbles: uint16x8_t) -> u32 {
    unsafe {
        let low = vshlq_u32(
            vmovl_u16(vget_low_u16(nibbles)),
            vld1q_s32(SIGNED_SHIFTS.as_ptr()),
        );
        let high = vshlq_u32(
            vmovl_high_u16(nibbles),
            vld1q_s32(SIGNED_SHIFTS.as_ptr().add(4)),
        );
        vaddvq_u32(vaddq_u32(low, high))
    }
}
