//! Property-based tests for swatch.
//!
//! Uses proptest to check invariants that must hold for any input.

use proptest::prelude::*;

use swatch::builtin;
use swatch::prelude::*;
use swatch::space::{hsva_to_rgba, rgba_to_hsva};

// ============================================================================
// Custom Strategies
// ============================================================================

/// Generate arbitrary quantized channels.
fn any_rgba() -> impl Strategy<Value = Rgba> {
    any::<[u8; 4]>().prop_map(Rgba::from)
}

/// Pick one named value from the built-in palette.
fn builtin_value() -> impl Strategy<Value = Rgba> {
    let values: Vec<Rgba> = builtin::dataset().values().map(|(_, v)| v.rgba()).collect();
    prop::sample::select(values)
}

/// Pick one fully opaque value from the built-in palette.
fn opaque_builtin_value() -> impl Strategy<Value = Rgba> {
    let values: Vec<Rgba> = builtin::dataset()
        .values()
        .map(|(_, v)| v.rgba())
        .filter(|rgba| rgba.alpha == u8::MAX)
        .collect();
    prop::sample::select(values)
}

/// Pick one x11 color name.
fn x11_name() -> impl Strategy<Value = String> {
    let ds = builtin::dataset();
    let x11 = SchemeSet::single(ds.find_named_scheme("x11").unwrap_or_default());
    let names: Vec<String> = ds
        .names()
        .filter(|(_, entry)| entry.schemes().intersects(x11))
        .map(|(index, _)| ds.name_str(index).to_string())
        .collect();
    prop::sample::select(names)
}

/// Randomly upper-case letters and sprinkle blanks between them.
fn scramble(name: &str, mask: u64) -> String {
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        let bit = mask.rotate_right(u32::try_from(i % 64).unwrap_or(0)) & 1 == 1;
        if bit {
            out.push(c.to_ascii_uppercase());
            if i > 0 && i % 3 == 0 {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Color Space Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Converting to HSV and back lands on the same quantized channels.
    #[test]
    fn prop_hsv_round_trip(rgba in any_rgba()) {
        let back = Rgba::from_normalized(hsva_to_rgba(rgba_to_hsva(rgba.normalized())));
        prop_assert_eq!(back, rgba);
    }

    /// HSV output stays in the unit cube.
    #[test]
    fn prop_hsv_in_range(rgba in any_rgba()) {
        for component in rgba.to_hsva() {
            prop_assert!((0.0..=1.0).contains(&component));
        }
    }

    /// Quantization never panics and always clamps.
    #[test]
    fn prop_from_normalized_clamps(channels in prop::array::uniform4(-10.0f64..10.0)) {
        let rgba = Rgba::from_normalized(channels);
        let expected = channels.map(|c| c.clamp(0.0, 1.0));
        for (got, want) in rgba.normalized().iter().zip(expected) {
            prop_assert!((got - want).abs() <= 0.5 / 255.0 + 1e-9);
        }
    }

    /// Packing and unpacking is lossless.
    #[test]
    fn prop_packed_round_trip(rgba in any_rgba()) {
        prop_assert_eq!(Rgba::from_packed(rgba.packed()), rgba);
    }
}

// ============================================================================
// Resolution Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every built-in value resolves from its own hex form.
    #[test]
    fn prop_hex_resolves_dataset_values(rgba in builtin_value()) {
        let mut session = Session::new();
        session.resolve(&rgba.hex()).unwrap();
        prop_assert_eq!(session.rgba().unwrap(), rgba);
    }

    /// Every opaque built-in value resolves from its six-digit hex form.
    #[test]
    fn prop_rgb_hex_resolves_opaque_values(rgba in opaque_builtin_value()) {
        let mut session = Session::new();
        let text = format!("#{:02x}{:02x}{:02x}", rgba.red, rgba.green, rgba.blue);
        session.resolve(&text).unwrap();
        prop_assert_eq!(session.rgba().unwrap(), rgba);
    }

    /// Name lookup ignores ASCII case and embedded whitespace.
    #[test]
    fn prop_name_folding(name in x11_name(), mask in any::<u64>()) {
        let mut session = Session::builder().schemes("x11").build().unwrap();
        session.resolve(&name).unwrap();
        let plain = session.value();
        session.resolve(&scramble(&name, mask)).unwrap();
        prop_assert_eq!(session.value(), plain);
    }

    /// Resolving a name and asking for it back in the same scheme yields a
    /// name for the same channels.
    #[test]
    fn prop_reverse_lookup_agrees(name in x11_name()) {
        let mut session = Session::builder().schemes("x11").output("x11").build().unwrap();
        session.resolve(&name).unwrap();
        let rgba = session.rgba().unwrap();
        let shown = session.name().unwrap().to_string();
        session.resolve(&shown).unwrap();
        prop_assert_eq!(session.rgba().unwrap(), rgba);
    }

    /// Index resolution never fails on an indexed scheme, whatever the index.
    #[test]
    fn prop_index_is_clipped(index in any::<i64>()) {
        let mut session = Session::builder().schemes("xterm256").build().unwrap();
        prop_assert!(session.resolve_index(index).is_ok());
    }

    /// Arbitrary text never panics the resolver.
    #[test]
    fn prop_resolve_never_panics(text in ".{0,40}") {
        let mut session = Session::builder().schemes("x11 svg ansi16").build().unwrap();
        let _ = session.resolve(&text);
    }
}
