//! Hex character to nibble mapping
//!
//! Two interchangeable realizations that agree on every hex digit:
//! - [`from_table`]: a 128-entry lookup table built once per process
//! - [`from_arith`]: branchless arithmetic, the same steps the SIMD
//!   backends run across all lanes at once
//!
//! Neither validates its input. Non-hex characters produce a value in
//! `0..=15` that callers must not rely on.

use std::sync::OnceLock;

/// Distance between a lowercase letter and its uppercase form (`'a' - 'A'`)
pub(crate) const CASE_FOLD: u8 = b'a' - b'A';

/// Gap between `'9'` and `'A'` in ASCII (`'A' - ('9' + 1)`)
pub(crate) const LETTER_GAP: u8 = b'A' - (b'9' + 1);

const TABLE_LEN: usize = 128;

static HEX_TABLE: OnceLock<HexTable> = OnceLock::new();

/// Character code to nibble value, 0 for anything outside `0-9A-Fa-f`.
///
/// Entries are `u32` so the table doubles as a 32-bit gather source.
/// Entry 0 is always 0: SIMD lanes that only pad the vector are pointed
/// at index 0 and must add nothing to the horizontal sum.
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct HexTable([u32; TABLE_LEN]);

impl HexTable {
    /// Look up the nibble for `c`. Codes past 127 map to 0.
    #[inline(always)]
    pub fn get(&self, c: u8) -> u8 {
        match self.0.get(c as usize) {
            Some(&value) => value as u8,
            None => 0,
        }
    }

    /// All entries, indexed by character code
    pub fn entries(&self) -> &[u32; TABLE_LEN] {
        &self.0
    }

    #[cfg_attr(not(all(feature = "simd", target_arch = "x86_64")), allow(dead_code))]
    pub(crate) fn as_ptr(&self) -> *const u32 {
        self.0.as_ptr()
    }
}

impl std::fmt::Debug for HexTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|(c, _)| (*c as u8).is_ascii_hexdigit())
                    .map(|(c, v)| (c as u8 as char, v)),
            )
            .finish()
    }
}

/// Build a fresh lookup table.
///
/// Case folding happens here, not at lookup time: `A-F` and `a-f` get
/// the same entries.
pub fn build_table() -> HexTable {
    let mut entries = [0u32; TABLE_LEN];
    for (value, digit) in (b'0'..=b'9').enumerate() {
        entries[digit as usize] = value as u32;
    }
    for (value, letter) in (10..).zip(b'A'..=b'F') {
        entries[letter as usize] = value;
        entries[(letter + CASE_FOLD) as usize] = value;
    }
    HexTable(entries)
}

/// The process-wide table, built on first use
#[inline]
pub fn table() -> &'static HexTable {
    HEX_TABLE.get_or_init(build_table)
}

/// Map `c` through the process-wide table
#[inline(always)]
pub fn from_table(c: u8) -> u8 {
    table().get(c)
}

/// Map `c` with sign-of-difference masks instead of branches.
///
/// `'F' - c` goes negative exactly when `c` is past `'F'` (lowercase for
/// valid input), `'9' - c` when `c` is a letter. An arithmetic shift by 31
/// turns each into an all-ones mask that gates the matching offset.
#[inline(always)]
pub const fn from_arith(c: u8) -> u8 {
    let c = c as i32;
    let is_lower = (b'F' as i32 - c) >> 31;
    let is_letter = (b'9' as i32 - c) >> 31;
    let value = c - (CASE_FOLD as i32 & is_lower) - (LETTER_GAP as i32 & is_letter) - b'0' as i32;
    (value & 0x0F) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_DIGITS: &[u8] = b"0123456789ABCDEFabcdef";

    #[test]
    fn test_boundary_digits() {
        for map in [from_table, from_arith] {
            assert_eq!(map(b'0'), 0);
            assert_eq!(map(b'9'), 9);
            assert_eq!(map(b'A'), 10);
            assert_eq!(map(b'a'), 10);
            assert_eq!(map(b'F'), 15);
            assert_eq!(map(b'f'), 15);
        }
    }

    #[test]
    fn test_table_and_arith_agree_on_hex_digits() {
        for &c in HEX_DIGITS {
            assert_eq!(
                from_table(c),
                from_arith(c),
                "mismatch for '{}'",
                c as char
            );
        }
    }

    #[test]
    fn test_table_matches_to_digit() {
        for code in 0u8..=255 {
            let expected = (code as char).to_digit(16).unwrap_or(0) as u8;
            assert_eq!(from_table(code), expected, "code {:#04x}", code);
        }
    }

    #[test]
    fn test_case_folded() {
        for (upper, lower) in b"ABCDEF".iter().zip(b"abcdef") {
            assert_eq!(from_table(*upper), from_table(*lower));
            assert_eq!(from_arith(*upper), from_arith(*lower));
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = build_table();
        for _ in 0..8 {
            assert_eq!(build_table(), first);
        }
        assert_eq!(*table(), first);
    }

    #[test]
    fn test_index_zero_is_zero() {
        assert_eq!(table().entries()[0], 0);
        assert_eq!(from_table(0), 0);
    }

    #[test]
    fn test_non_hex_maps_to_zero_in_table() {
        for c in 0u8..=255 {
            if !c.is_ascii_hexdigit() {
                assert_eq!(from_table(c), 0, "'{}' should map to 0", c as char);
            }
        }
    }

    #[test]
    fn test_arith_stays_in_nibble_range() {
        for c in 0u8..=255 {
            assert!(from_arith(c) <= 0x0F);
        }
    }

    #[test]
    fn test_table_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| table() as *const HexTable as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
