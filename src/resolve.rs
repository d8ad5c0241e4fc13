//! Color expression resolution.
//!
//! An expression is canonicalized (leading blanks dropped, commas turned
//! into spaces) and then tried against each path in turn until one
//! resolves:
//!
//! 1. `#` followed by up to 8 hex digits as `RRGGBBAA`, then up to 6 hex
//!    digits as opaque `RRGGBB`,
//! 2. if it starts with a digit or `.`: three or four floats as H S V [A],
//! 3. a whole integer, as a slot of the active indexed scheme,
//! 4. a name in the active named schemes, with whitespace removed and
//!    ASCII letters lowercased.
//!
//! Numeric paths only succeed when the resulting channels are in the
//! dataset. Case folding happens only on the name path.

use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use crate::dataset::ValueRef;
use crate::error::ResolveError;
use crate::session::Session;
use crate::space::{CHANNEL_BITS, CHANNEL_MAX, Rgba, hsva_to_rgba};

impl Session<'_> {
    /// Resolve a color expression and make it the current value.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::SchemeUnknown`] if the expression reached the name
    ///   path and no named input scheme is active,
    /// - [`ResolveError::ColorUnknown`] if no path resolved it,
    /// - [`ResolveError::AllocationFailure`] if the canonicalization buffer
    ///   could not grow.
    pub fn resolve(&mut self, expression: &str) -> Result<(), ResolveError> {
        canonicalize_into(&mut self.canon, expression)?;

        if self.canon.starts_with('#') && self.resolve_hex().is_ok() {
            return Ok(());
        }

        if self.canon.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && let Some(hsva) = scan_hsva(&self.canon)
            && self.resolve_hsva(hsva).is_ok()
        {
            log::trace!("resolved {expression:?} as hsv");
            return Ok(());
        }

        if let Ok(index) = self.canon.trim().parse::<i64>()
            && self.resolve_index(index).is_ok()
        {
            log::trace!("resolved {expression:?} as index {index}");
            return Ok(());
        }

        self.canon.retain(|c| !c.is_whitespace());
        self.canon.make_ascii_lowercase();
        self.resolve_name()
    }

    /// Resolve normalized RGBA channels by exact lookup.
    ///
    /// Channels are clamped to `[0, 1]` and quantized first.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorNoName`] if the channels are not in the
    /// dataset; the current value is left unchanged.
    pub fn resolve_rgba(&mut self, rgba: [f64; 4]) -> Result<(), ResolveError> {
        self.resolve_exact(Rgba::from_normalized(rgba))
    }

    /// Resolve HSV plus alpha by exact lookup of the converted channels.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorNoName`] if the converted channels are
    /// not in the dataset.
    pub fn resolve_hsva(&mut self, hsva: [f64; 4]) -> Result<(), ResolveError> {
        self.resolve_rgba(hsva_to_rgba(hsva))
    }

    /// Resolve quantized channels by exact lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ColorNoName`] if the channels are not in the
    /// dataset.
    pub fn resolve_exact(&mut self, rgba: Rgba) -> Result<(), ResolveError> {
        let value = self
            .dataset
            .find_rgba(rgba)
            .ok_or(ResolveError::ColorNoName)?;
        self.set_value(value);
        Ok(())
    }

    /// Resolve a slot of the active indexed scheme.
    ///
    /// Out-of-range indexes are clipped to the first or last slot.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::SchemeUnknown`] if no indexed input scheme is
    /// active.
    pub fn resolve_index(&mut self, index: i64) -> Result<(), ResolveError> {
        let position = self
            .schemes
            .input_index()
            .ok_or_else(|| ResolveError::SchemeUnknown(String::new()))?;
        let slots = self.dataset.indexed_slots(position);
        let last = slots.len().saturating_sub(1);
        let clipped = usize::try_from(index.max(0)).map_or(last, |i| i.min(last));
        let value = *slots
            .get(clipped)
            .ok_or_else(|| ResolveError::ColorUnknown(index.to_string()))?;
        self.set_value(value);
        Ok(())
    }

    fn resolve_hex(&mut self) -> Result<(), ResolveError> {
        let digits = self.canon.get(1..).unwrap_or_default();
        // Alpha is only read when more than six digits are present.
        let run = digits.bytes().take_while(u8::is_ascii_hexdigit).count();
        let rgba = if run > 6 {
            parse_hex_prefix(digits, 8).map(Rgba::from_packed)
        } else {
            None
        };
        let rgb = parse_hex_prefix(digits, 6)
            .map(|word| Rgba::from_packed((word << CHANNEL_BITS) | u32::from(CHANNEL_MAX)));

        if let Some(rgba) = rgba
            && self.resolve_exact(rgba).is_ok()
        {
            return Ok(());
        }
        self.resolve_exact(rgb.ok_or(ResolveError::ColorNoName)?)
    }

    fn resolve_name(&mut self) -> Result<(), ResolveError> {
        let schemes = self.schemes.input();
        if schemes.is_empty() {
            return Err(ResolveError::SchemeUnknown(String::new()));
        }

        if let Some(value) = self.cache.lookup(self.dataset, schemes, &self.canon) {
            self.set_value(value);
            return Ok(());
        }

        let found = self
            .dataset
            .name_run(&self.canon)
            .find(|(_, entry)| entry.schemes().intersects(schemes))
            .map(|(index, entry)| (index, ValueRef::Named(entry.value())));

        let Some((index, value)) = found else {
            log::debug!("unknown color {:?}", self.canon);
            return Err(ResolveError::ColorUnknown(self.canon.clone()));
        };
        self.set_value(value);
        self.cache.insert(schemes, index, value);
        Ok(())
    }
}

/// Copy `expression` into `buf`, dropping leading blanks and turning commas
/// into spaces.
fn canonicalize_into(buf: &mut String, expression: &str) -> Result<(), ResolveError> {
    let trimmed = expression.trim_start_matches([' ', '\t']);
    buf.clear();
    buf.try_reserve(trimmed.len())?;
    buf.extend(trimmed.chars().map(|c| if c == ',' { ' ' } else { c }));
    Ok(())
}

/// Parse the leading run of up to `max_digits` hex digits.
fn parse_hex_prefix(s: &str, max_digits: usize) -> Option<u32> {
    let len = s
        .bytes()
        .take(max_digits)
        .take_while(u8::is_ascii_hexdigit)
        .count();
    if len == 0 {
        return None;
    }
    u32::from_str_radix(&s[..len], 16).ok()
}

/// Scan up to four leading floats; fewer than three is no match.
///
/// Missing alpha defaults to fully opaque.
fn scan_hsva(s: &str) -> Option<[f64; 4]> {
    static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[ \t]*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("valid regex")
    });

    let mut numbers: SmallVec<[f64; 4]> = SmallVec::new();
    let mut rest = s;
    while numbers.len() < 4 {
        let Some(caps) = FLOAT_RE.captures(rest) else {
            break;
        };
        let Ok(number) = caps[1].parse::<f64>() else {
            break;
        };
        numbers.push(number);
        rest = &rest[caps[0].len()..];
    }

    match numbers.as_slice() {
        &[h, s, v] => Some([h, s, v, 1.0]),
        &[h, s, v, a] => Some([h, s, v, a]),
        _ => None,
    }
}
