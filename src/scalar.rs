//! Portable table-lookup decoder
//!
//! Always available; the dispatcher falls back here when no SIMD backend
//! can run on the current CPU.

use crate::nibble;
use crate::{ALPHA_OPAQUE, LANE_SHIFTS};

/// Decode `RRGGBB` into ARGB32 with alpha forced to `0xFF`
#[inline]
pub fn decode_rgb(hex: &[u8; 6]) -> u32 {
    let table = nibble::table();
    let mut word = ALPHA_OPAQUE;
    for (&c, &shift) in hex.iter().zip(&LANE_SHIFTS) {
        word |= (table.get(c) as u32) << shift;
    }
    word
}

/// Decode `RRGGBBAA` into ARGB32; the trailing pair becomes the top byte
#[inline]
pub fn decode_rgba(hex: &[u8; 8]) -> u32 {
    let table = nibble::table();
    let mut word = 0;
    for (&c, &shift) in hex.iter().zip(&LANE_SHIFTS) {
        word |= (table.get(c) as u32) << shift;
    }
    word
}
