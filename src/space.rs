//! Color-space math.
//!
//! Resolved values are stored as quantized RGBA quadruples ([`Rgba`]). This
//! module converts between that representation and normalized RGBA, HSV and
//! CMYK floats.
//!
//! Hue uses a period of `1.0`: `0.0`, `1.0` and `2.0` all denote red.
//!
//! # Examples
//!
//! ```
//! use swatch::space::{Rgba, hsva_to_rgba};
//!
//! let red = Rgba::from_normalized(hsva_to_rgba([0.0, 1.0, 1.0, 1.0]));
//! assert_eq!(red, Rgba::new(255, 0, 0, 255));
//! assert_eq!(red.hex(), "#ff0000ff");
//! ```

use std::fmt;

/// Bit width of a single quantized channel.
pub const CHANNEL_BITS: u32 = 8;

/// Largest representable quantized channel value.
pub const CHANNEL_MAX: u8 = u8::MAX;

/// A quantized RGBA quadruple.
///
/// Field order matches the packed `0xRRGGBBAA` layout, so the derived
/// ordering is the same as comparing packed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// Create a new quadruple from quantized channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create a fully opaque quadruple.
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, CHANNEL_MAX)
    }

    /// Unpack a `0xRRGGBBAA` word.
    #[must_use]
    pub const fn from_packed(word: u32) -> Self {
        let [red, green, blue, alpha] = word.to_be_bytes();
        Self::new(red, green, blue, alpha)
    }

    /// Pack into a `0xRRGGBBAA` word.
    #[must_use]
    pub const fn packed(&self) -> u32 {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    /// Returns the channels as a byte array.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Returns the 8-digit hex rendering `#rrggbbaa`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:08x}", self.packed())
    }

    /// Quantize normalized channels, clamping each to `[0, 1]` first.
    #[must_use]
    pub fn from_normalized(rgba: [f64; 4]) -> Self {
        let [red, green, blue, alpha] = rgba.map(quantize);
        Self::new(red, green, blue, alpha)
    }

    /// Returns the channels as floats in `[0, 1]`.
    #[must_use]
    pub fn normalized(&self) -> [f64; 4] {
        self.bytes().map(|c| f64::from(c) / f64::from(CHANNEL_MAX))
    }

    /// Convert to HSV plus alpha.
    #[must_use]
    pub fn to_hsva(&self) -> [f64; 4] {
        rgba_to_hsva(self.normalized())
    }

    /// Convert to CMYK. Alpha is dropped.
    #[must_use]
    pub fn to_cmyk(&self) -> [f64; 4] {
        rgba_to_cmyk(self.normalized())
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((red, green, blue, alpha): (u8, u8, u8, u8)) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.red, self.green, self.blue, self.alpha)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0-255 before the cast"
)]
fn quantize(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * f64::from(CHANNEL_MAX)).round() as u8
}

/// Convert HSV plus alpha to normalized RGBA.
///
/// Hue is taken modulo `1.0`; saturation and value are clamped to `[0, 1]`.
/// Alpha passes through unchanged.
#[must_use]
pub fn hsva_to_rgba([hue, saturation, value, alpha]: [f64; 4]) -> [f64; 4] {
    let saturation = saturation.clamp(0.0, 1.0);
    let value = value.clamp(0.0, 1.0);

    if saturation <= 0.0 {
        return [value, value, value, alpha];
    }

    // rem_euclid can round up to exactly 1.0 for tiny negative hues.
    let mut sector = hue.rem_euclid(1.0) * 6.0;
    if sector >= 6.0 {
        sector -= 6.0;
    }
    let base = sector.floor();
    let fraction = sector - base;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * fraction);
    let t = value * (1.0 - saturation * (1.0 - fraction));

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "sector is in 0.0..6.0"
    )]
    let (red, green, blue) = match base as u8 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    [red, green, blue, alpha]
}

/// Convert normalized RGBA to HSV plus alpha.
#[must_use]
pub fn rgba_to_hsva([red, green, blue, alpha]: [f64; 4]) -> [f64; 4] {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let delta = max - min;

    let saturation = if max > 0.0 { delta / max } else { 0.0 };
    if delta.abs() < f64::EPSILON {
        return [0.0, saturation, max, alpha];
    }

    let hue = if (max - red).abs() < f64::EPSILON {
        (green - blue) / delta + (if green < blue { 6.0 } else { 0.0 })
    } else if (max - green).abs() < f64::EPSILON {
        (blue - red) / delta + 2.0
    } else {
        (red - green) / delta + 4.0
    };

    [hue / 6.0, saturation, max, alpha]
}

/// Convert normalized RGBA to CMYK. Alpha is ignored.
#[must_use]
pub fn rgba_to_cmyk([red, green, blue, _alpha]: [f64; 4]) -> [f64; 4] {
    let key = 1.0 - red.max(green).max(blue);
    if key >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let scale = 1.0 - key;
    [
        (1.0 - red - key) / scale,
        (1.0 - green - key) / scale,
        (1.0 - blue - key) / scale,
        key,
    ]
}
