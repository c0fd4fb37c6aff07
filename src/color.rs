use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB triple as exposed on every sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsl(self) -> [f64; 3] {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

// ------------------------------------------------------------
// RGB → HSL
// ------------------------------------------------------------

/// Convert 8-bit RGB into `[hue, saturation, lightness]`, all in `[0, 1]`.
///
/// Computed in `f64` so results match the usual double-precision formula bit
/// for bit. When several channels share the maximum the hue branch is picked in
/// the order red, green, blue.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> [f64; 3] {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // Achromatic.
    if max == min {
        return [0.0, 0.0, l];
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [h / 6.0, s, l]
}

// ------------------------------------------------------------
// RGB → hex
// ------------------------------------------------------------

/// Render `#rrggbb` in lowercase.
///
/// The channels are packed under a leading guard bit so the hex rendering is
/// always seven digits wide; the guard digit is then dropped.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    let packed = (1u32 << 24) | (r as u32) << 16 | (g as u32) << 8 | b as u32;
    let digits = format!("{packed:x}");
    format!("#{}", &digits[1..])
}
