//! Decode `RRGGBB` / `RRGGBBAA` hex color text into packed ARGB32.
//!
//! Two decoders implement the same contract:
//! - [`scalar`]: one table lookup per character, available everywhere
//! - SIMD: all characters classified at once in vector lanes (AVX2 on
//!   x86_64, NEON on aarch64), shifted into place and summed horizontally
//!
//! Both produce bit-identical words for every valid input. The crate-level
//! [`decode_rgb`] and [`decode_rgba`] pick the fastest backend once per
//! process and reuse it. That choice reads no files; call [`init_global`]
//! with [`DecoderConfig::load_with_overrides`] first to honour config files.
//!
//! ```
//! assert_eq!(hex_argb::decode_rgb(b"a1234F"), 0xFFA1_234F);
//! assert_eq!(hex_argb::decode_rgba(b"a1234F11"), 0x11A1_234F);
//!
//! let color: hex_argb::Argb32 = "#a1234F".parse().unwrap();
//! assert_eq!(color.red(), 0xA1);
//! ```
//!
//! Input is trusted. Non-hex characters never fail or panic, but the value
//! they decode to is unspecified and may differ between backends.

mod color;
mod config;
mod dispatch;
mod error;
pub mod nibble;
pub mod scalar;
pub mod simd;

pub use color::{Argb32, parse_hex_color};
pub use config::{BACKEND_ENV, BackendChoice, DecoderConfig};
pub use dispatch::{Backend, Dispatcher, HexDecoder, Scalar, global, init_global};
pub use error::ColorError;

/// Alpha byte of an `RRGGBB` color: fully opaque
pub(crate) const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Bit offset of each character's nibble in the ARGB32 word.
///
/// Characters 0-5 are `RRGGBB`, 6-7 are the optional `AA` that lands in
/// the top byte. SIMD backends use the same table as per-lane shift counts.
pub(crate) const LANE_SHIFTS: [u32; 8] = [20, 16, 12, 8, 4, 0, 28, 24];

/// Decode `RRGGBB` into ARGB32 (`0xFFRRGGBB`) on the process-wide backend
#[inline]
pub fn decode_rgb(hex: &[u8; 6]) -> u32 {
    global().decode_rgb(hex)
}

/// Decode `RRGGBBAA` into ARGB32 (`0xAARRGGBB`) on the process-wide backend
#[inline]
pub fn decode_rgba(hex: &[u8; 8]) -> u32 {
    global().decode_rgba(hex)
}
