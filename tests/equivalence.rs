//! Property tests: every backend decodes valid hex exactly like the scalar path.

use hex_argb::{Argb32, Backend, Dispatcher, HexDecoder, nibble, parse_hex_color, scalar};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const HEX_DIGITS: &[u8] = b"0123456789ABCDEFabcdef";

fn hex_digit() -> impl Strategy<Value = u8> {
    prop::sample::select(HEX_DIGITS)
}

fn rgb_text() -> impl Strategy<Value = [u8; 6]> {
    prop::array::uniform6(hex_digit())
}

fn rgba_text() -> impl Strategy<Value = [u8; 8]> {
    prop::array::uniform8(hex_digit())
}

fn vector_backends() -> Vec<Dispatcher> {
    [Backend::Simd, Backend::SimdGather]
        .into_iter()
        .filter_map(Dispatcher::try_new)
        .collect()
}

/// Independent reference: parse the digits as one hex number
fn reference_rgb(hex: &[u8; 6]) -> u32 {
    let text = std::str::from_utf8(hex).unwrap();
    0xFF00_0000 | u32::from_str_radix(text, 16).unwrap()
}

fn reference_rgba(hex: &[u8; 8]) -> u32 {
    let text = std::str::from_utf8(hex).unwrap();
    u32::from_str_radix(text, 16).unwrap().rotate_right(8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn proptest_rgb_backends_agree(hex in rgb_text()) {
        let expected = scalar::decode_rgb(&hex);
        prop_assert_eq!(expected >> 24, 0xFF);
        prop_assert_eq!(expected, reference_rgb(&hex));
        prop_assert_eq!(hex_argb::decode_rgb(&hex), expected);

        for dispatcher in vector_backends() {
            prop_assert_eq!(dispatcher.decode_rgb(&hex), expected, "{}", dispatcher.backend());
        }
    }

    #[test]
    fn proptest_rgba_backends_agree(hex in rgba_text()) {
        let expected = scalar::decode_rgba(&hex);
        prop_assert_eq!(expected, reference_rgba(&hex));
        prop_assert_eq!(hex_argb::decode_rgba(&hex), expected);

        for dispatcher in vector_backends() {
            prop_assert_eq!(dispatcher.decode_rgba(&hex), expected, "{}", dispatcher.backend());
        }
    }

    #[test]
    fn proptest_case_insensitive(hex in rgba_text()) {
        let upper = hex.map(|c| c.to_ascii_uppercase());
        let lower = hex.map(|c| c.to_ascii_lowercase());
        prop_assert_eq!(scalar::decode_rgba(&upper), scalar::decode_rgba(&lower));

        for dispatcher in vector_backends() {
            prop_assert_eq!(dispatcher.decode_rgba(&upper), dispatcher.decode_rgba(&lower));
        }
    }

    #[test]
    fn proptest_nibble_forms_agree(c in hex_digit()) {
        prop_assert_eq!(nibble::from_table(c), nibble::from_arith(c));
    }

    #[test]
    fn proptest_arbitrary_bytes_never_panic(bytes in prop::array::uniform8(any::<u8>())) {
        // Output is unspecified for non-hex input; every backend must still return
        let rgb: [u8; 6] = [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]];
        let _ = scalar::decode_rgb(&rgb);
        let _ = scalar::decode_rgba(&bytes);
        for dispatcher in vector_backends() {
            let _ = dispatcher.decode_rgb(&rgb);
            let _ = dispatcher.decode_rgba(&bytes);
        }
    }

    #[test]
    fn proptest_parse_matches_decode(hex in rgba_text(), prefixed in any::<bool>()) {
        let digits = std::str::from_utf8(&hex).unwrap();
        let text = if prefixed { format!("#{}", digits) } else { digits.to_string() };

        let color: Argb32 = parse_hex_color(&text).unwrap();
        prop_assert_eq!(color.argb(), scalar::decode_rgba(&hex));

        let shown = color.to_string();
        let expected = format!("#{}", digits);
        prop_assert!(
            shown.eq_ignore_ascii_case(&expected),
            "{} does not render back as {}",
            shown,
            expected
        );
    }
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenarios_on_every_available_backend() {
    for backend in Backend::ALL {
        let Some(dispatcher) = Dispatcher::try_new(backend) else {
            eprintln!("{} not available, skipping", backend);
            continue;
        };

        assert_eq!(dispatcher.decode_rgb(b"a1234F"), 0b11111111_10100001_00100011_01001111);
        assert_eq!(dispatcher.decode_rgba(b"a1234F11"), 0b00010001_10100001_00100011_01001111);
        assert_eq!(dispatcher.decode_rgb(b"000000"), 0xFF00_0000);
        assert_eq!(dispatcher.decode_rgb(b"FFFFFF"), 0xFFFF_FFFF);
        assert_eq!(dispatcher.decode_rgba(b"FFFFFFFF"), 0xFFFF_FFFF);
    }
}

#[test]
fn prefixed_text_like_css() {
    assert_eq!(parse_hex_color("#a1234F").unwrap().argb(), 0xFFA1_234F);
    assert_eq!(parse_hex_color("#a1234F11").unwrap().argb(), 0x11A1_234F);
}
