use palette::Srgba;
use palette::cast::from_component_slice;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, rgb_to_hex, rgb_to_hsl};

/// One visible pixel expressed as RGB, HSL and hex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub rgb: Rgb,
    /// `[hue, saturation, lightness]`, each in `[0, 1]`.
    pub hsl: [f64; 3],
    /// `#rrggbb`, lowercase.
    pub hex: String,
    /// Same value as `hsl[2]`.
    pub lightness: f64,
}

impl ColorSample {
    pub fn from_rgb(rgb: Rgb) -> Self {
        let hsl = rgb_to_hsl(rgb.r, rgb.g, rgb.b);
        Self {
            rgb,
            hsl,
            hex: rgb_to_hex(rgb.r, rgb.g, rgb.b),
            lightness: hsl[2],
        }
    }
}

/// Turn raw RGBA bytes into one [`ColorSample`] per visible pixel.
///
/// * `None` yields an empty list: callers without pixel data yet are not an
///   error.
/// * Only alpha == 0 is skipped. Any other alpha counts as opaque.
/// * Output keeps raster scan order and every duplicate.
/// * A trailing partial pixel is ignored.
pub fn calculate_colors(data: Option<&[u8]>) -> Vec<ColorSample> {
    let data = match data {
        Some(data) => data,
        None => return Vec::new(),
    };

    let whole = data.len() - data.len() % 4;
    let pixels: &[Srgba<u8>] = from_component_slice(&data[..whole]);

    let mut colors = Vec::with_capacity(pixels.len());
    for pixel in pixels {
        if pixel.alpha == 0 {
            continue;
        }
        colors.push(ColorSample::from_rgb(pixel.color.into()));
    }

    tracing::debug!(
        pixels = data.len() / 4,
        samples = colors.len(),
        "sampled pixel buffer"
    );
    colors
}
