//! # cover_colors
//!
//! Per-pixel color extraction for theming UI from album artwork.
//!
//! The pipeline is strictly sequential:
//! 1. Load and decode the image from a URL (the only await point).
//! 2. Rasterize it onto a transparent off-screen RGBA surface at its natural size.
//! 3. Turn every pixel whose alpha is not exactly zero into RGB, HSL and hex.
//!
//! No clustering or deduplication happens: an image of `w × h` opaque pixels
//! yields `w × h` samples in raster scan order.
//!
//! ```rust,no_run
//! use cover_colors::{ExtractOptions, extract_colors};
//!
//! # async fn run() -> cover_colors::Result<()> {
//! let options = ExtractOptions::default().with_cross_origin("anonymous");
//! let colors = extract_colors("https://i.scdn.co/image/ab67616d0000b273", &options).await?;
//! println!("{} samples, first {}", colors.len(), colors[0].hex);
//! # Ok(())
//! # }
//! ```
//!
//! On `wasm32` the same extraction is exported to JavaScript as
//! `extractColors(imageUrl, { crossOrigin })`, driven by the browser's own image
//! and canvas primitives.

pub mod color;
pub mod config;
pub mod error;
pub mod raster;
pub mod sampler;

#[cfg(not(target_arch = "wasm32"))]
pub mod loader;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::{Rgb, rgb_to_hex, rgb_to_hsl};
pub use config::{DEFAULT_MAX_SURFACE_PIXELS, ExtractOptions};
pub use error::{ExtractError, Result};
pub use raster::rasterize;
pub use sampler::{ColorSample, calculate_colors};

#[cfg(not(target_arch = "wasm32"))]
pub use loader::load_image;

use image::DynamicImage;

/// Rasterize an already decoded image and sample it.
///
/// This is the synchronous tail of [`extract_colors`]; the surface lives only
/// for the duration of the call.
pub fn extract_colors_from_image(
    img: &DynamicImage,
    options: &ExtractOptions,
) -> Result<Vec<ColorSample>> {
    let surface = rasterize(img, options.max_surface_pixels)?;
    Ok(calculate_colors(Some(surface.as_raw().as_slice())))
}

/// Load `image_url`, rasterize it and return one sample per visible pixel.
///
/// Fails with [`ExtractError::ImageLoad`] when the image cannot be fetched or
/// decoded, and with [`ExtractError::Rasterization`] when no surface can be
/// allocated for it. No partial results are returned on failure.
#[cfg(not(target_arch = "wasm32"))]
#[tracing::instrument(
    skip(image_url, options),
    fields(url = %error::display_url(image_url), cross_origin = ?options.cross_origin)
)]
pub async fn extract_colors(image_url: &str, options: &ExtractOptions) -> Result<Vec<ColorSample>> {
    let img = load_image(image_url, options).await?;
    let colors = extract_colors_from_image(&img, options)?;
    tracing::debug!(samples = colors.len(), "extracted colors");
    Ok(colors)
}
