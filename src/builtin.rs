//! The compiled-in palette.
//!
//! Named schemes:
//! - `x11`: X11 color names (as shipped with graphviz-style tools),
//! - `svg`: SVG/CSS color keywords,
//! - `ansi`: the 16 standard terminal color names.
//!
//! Indexed schemes:
//! - `ansi16`: the standard 16-color terminal palette,
//! - `xterm256`: the 256-color xterm palette,
//! - `blues3`, `greens3`, `set13`: small ColorBrewer palettes.
//!
//! Where schemes disagree on a name (`green`, `gray`, `maroon`, `purple`,
//! `red` ...) the `x11` spelling is declared first and so wins when several
//! schemes are active.

use std::sync::LazyLock;

use crate::dataset::{Dataset, DatasetBuilder};
use crate::space::Rgba;

const fn rgb(red: u8, green: u8, blue: u8) -> Rgba {
    Rgba::opaque(red, green, blue)
}

static X11: &[(&str, Rgba)] = &[
    ("aliceblue", rgb(240, 248, 255)),
    ("antiquewhite", rgb(250, 235, 215)),
    ("aquamarine", rgb(127, 255, 212)),
    ("azure", rgb(240, 255, 255)),
    ("beige", rgb(245, 245, 220)),
    ("black", rgb(0, 0, 0)),
    ("blue", rgb(0, 0, 255)),
    ("blue1", rgb(0, 0, 255)),
    ("brown", rgb(165, 42, 42)),
    ("cornflowerblue", rgb(100, 149, 237)),
    ("crimson", rgb(220, 20, 60)),
    ("cyan", rgb(0, 255, 255)),
    ("darkgreen", rgb(0, 100, 0)),
    ("forestgreen", rgb(34, 139, 34)),
    ("gold", rgb(255, 215, 0)),
    ("gray", rgb(192, 192, 192)),
    ("grey", rgb(192, 192, 192)),
    ("green", rgb(0, 255, 0)),
    ("green1", rgb(0, 255, 0)),
    ("lightblue", rgb(173, 216, 230)),
    ("magenta", rgb(255, 0, 255)),
    ("maroon", rgb(176, 48, 96)),
    ("navy", rgb(0, 0, 128)),
    ("navyblue", rgb(0, 0, 128)),
    ("orange", rgb(255, 165, 0)),
    ("pink", rgb(255, 192, 203)),
    ("purple", rgb(160, 32, 240)),
    ("red", rgb(255, 0, 0)),
    ("red1", rgb(255, 0, 0)),
    ("salmon", rgb(250, 128, 114)),
    ("skyblue", rgb(135, 206, 235)),
    ("tomato", rgb(255, 99, 71)),
    ("transparent", Rgba::new(255, 255, 254, 0)),
    ("violet", rgb(238, 130, 238)),
    ("white", rgb(255, 255, 255)),
    ("yellow", rgb(255, 255, 0)),
];

static SVG: &[(&str, Rgba)] = &[
    ("aliceblue", rgb(240, 248, 255)),
    ("aqua", rgb(0, 255, 255)),
    ("black", rgb(0, 0, 0)),
    ("blue", rgb(0, 0, 255)),
    ("cornflowerblue", rgb(100, 149, 237)),
    ("crimson", rgb(220, 20, 60)),
    ("cyan", rgb(0, 255, 255)),
    ("fuchsia", rgb(255, 0, 255)),
    ("gold", rgb(255, 215, 0)),
    ("gray", rgb(128, 128, 128)),
    ("green", rgb(0, 128, 0)),
    ("grey", rgb(128, 128, 128)),
    ("lime", rgb(0, 255, 0)),
    ("magenta", rgb(255, 0, 255)),
    ("maroon", rgb(128, 0, 0)),
    ("navy", rgb(0, 0, 128)),
    ("olive", rgb(128, 128, 0)),
    ("orange", rgb(255, 165, 0)),
    ("pink", rgb(255, 192, 203)),
    ("purple", rgb(128, 0, 128)),
    ("red", rgb(255, 0, 0)),
    ("salmon", rgb(250, 128, 114)),
    ("silver", rgb(192, 192, 192)),
    ("skyblue", rgb(135, 206, 235)),
    ("teal", rgb(0, 128, 128)),
    ("tomato", rgb(255, 99, 71)),
    ("violet", rgb(238, 130, 238)),
    ("white", rgb(255, 255, 255)),
    ("yellow", rgb(255, 255, 0)),
];

/// Standard 16-color terminal palette.
static STANDARD_PALETTE: [Rgba; 16] = [
    rgb(0, 0, 0),       // 0: Black
    rgb(170, 0, 0),     // 1: Red
    rgb(0, 170, 0),     // 2: Green
    rgb(170, 85, 0),    // 3: Yellow
    rgb(0, 0, 170),     // 4: Blue
    rgb(170, 0, 170),   // 5: Magenta
    rgb(0, 170, 170),   // 6: Cyan
    rgb(170, 170, 170), // 7: White
    rgb(85, 85, 85),    // 8: Bright Black
    rgb(255, 85, 85),   // 9: Bright Red
    rgb(85, 255, 85),   // 10: Bright Green
    rgb(255, 255, 85),  // 11: Bright Yellow
    rgb(85, 85, 255),   // 12: Bright Blue
    rgb(255, 85, 255),  // 13: Bright Magenta
    rgb(85, 255, 255),  // 14: Bright Cyan
    rgb(255, 255, 255), // 15: Bright White
];

static ANSI_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright_black",
    "bright_red",
    "bright_green",
    "bright_yellow",
    "bright_blue",
    "bright_magenta",
    "bright_cyan",
    "bright_white",
];

static BLUES3: [Rgba; 3] = [rgb(222, 235, 247), rgb(158, 202, 225), rgb(49, 130, 189)];
static GREENS3: [Rgba; 3] = [rgb(229, 245, 224), rgb(161, 217, 155), rgb(49, 163, 84)];
static SET13: [Rgba; 3] = [rgb(228, 26, 28), rgb(55, 126, 184), rgb(77, 175, 74)];

/// Generate the 256-color xterm palette.
fn generate_eight_bit_palette() -> [Rgba; 256] {
    let mut palette = [Rgba::default(); 256];

    // 0-15: Standard colors
    palette[..16].copy_from_slice(&STANDARD_PALETTE);

    // 16-231: 6x6x6 color cube
    let levels = [0u8, 95, 135, 175, 215, 255];
    for r in 0..6 {
        for g in 0..6 {
            for b in 0..6 {
                let index = 16 + r * 36 + g * 6 + b;
                palette[index] = rgb(levels[r], levels[g], levels[b]);
            }
        }
    }

    // 232-255: Grayscale ramp
    for i in 0..24 {
        #[expect(clippy::cast_possible_truncation, reason = "max value is 8+23*10=238 which fits in u8")]
        let gray = (8 + i * 10) as u8;
        palette[232 + i] = rgb(gray, gray, gray);
    }

    palette
}

fn build() -> Dataset {
    let ansi: Vec<(&str, Rgba)> = ANSI_NAMES
        .iter()
        .copied()
        .zip(STANDARD_PALETTE)
        .chain([("gray", STANDARD_PALETTE[8]), ("grey", STANDARD_PALETTE[8])])
        .collect();

    DatasetBuilder::new()
        .named_scheme("x11", "black")
        .named_scheme("svg", "black")
        .named_scheme("ansi", "white")
        .colors("x11", X11)
        .colors("svg", SVG)
        .colors("ansi", &ansi)
        .indexed_scheme("ansi16", STANDARD_PALETTE)
        .indexed_scheme("xterm256", generate_eight_bit_palette())
        .indexed_scheme("blues3", BLUES3)
        .indexed_scheme("greens3", GREENS3)
        .indexed_scheme("set13", SET13)
        .build()
        .expect("built-in palette is consistent")
}

static BUILTIN: LazyLock<Dataset> = LazyLock::new(build);

/// The compiled-in dataset, assembled on first use.
#[must_use]
pub fn dataset() -> &'static Dataset {
    &BUILTIN
}
