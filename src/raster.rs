use image::{DynamicImage, GenericImageView, RgbaImage, imageops};

use crate::error::{ExtractError, Result};

/// Draw `img` onto a fresh off-screen surface and hand the surface back.
///
/// The surface starts fully transparent and matches the image's natural size.
/// The image is placed at (0, 0), unscaled, with its pixels replacing the
/// surface's. The returned buffer is row-major RGBA, 4 bytes per pixel.
///
/// Fails with [`ExtractError::Rasterization`] when no surface can be allocated:
/// the image has no area, or it exceeds `max_surface_pixels`.
pub fn rasterize(img: &DynamicImage, max_surface_pixels: u64) -> Result<RgbaImage> {
    let (w, h) = img.dimensions();
    let area = w as u64 * h as u64;

    if area == 0 {
        return Err(ExtractError::rasterization(format!(
            "cannot create a {w}x{h} drawing surface"
        )));
    }
    if area > max_surface_pixels {
        return Err(ExtractError::rasterization(format!(
            "{w}x{h} surface exceeds the {max_surface_pixels} pixel limit"
        )));
    }

    let mut surface = RgbaImage::new(w, h);
    imageops::replace(&mut surface, &img.to_rgba8(), 0, 0);

    tracing::debug!(width = w, height = h, "rasterized image");
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    #[test]
    fn keeps_natural_size_and_pixels() {
        let mut src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        src.put_pixel(2, 1, Rgba([1, 2, 3, 0]));
        let surface = rasterize(&DynamicImage::ImageRgba8(src.clone()), u64::MAX).unwrap();

        assert_eq!(surface.dimensions(), (3, 2));
        assert_eq!(surface.as_raw(), src.as_raw());
    }

    #[test]
    fn opaque_sources_gain_full_alpha() {
        let src = RgbImage::from_pixel(2, 2, Rgb([7, 8, 9]));
        let surface = rasterize(&DynamicImage::ImageRgb8(src), u64::MAX).unwrap();

        assert_eq!(surface.as_raw().len(), 2 * 2 * 4);
        assert!(surface.pixels().all(|p| *p == Rgba([7, 8, 9, 255])));
    }

    #[test]
    fn row_major_layout() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        src.put_pixel(0, 1, Rgba([0, 255, 0, 255]));
        let surface = rasterize(&DynamicImage::ImageRgba8(src), u64::MAX).unwrap();
        let raw = surface.as_raw();

        // second pixel of the first row
        assert_eq!(&raw[4..8], &[255, 0, 0, 255]);
        // first pixel of the second row
        assert_eq!(&raw[8..12], &[0, 255, 0, 255]);
    }

    #[test]
    fn empty_image_has_no_surface() {
        let src = DynamicImage::ImageRgba8(RgbaImage::new(0, 4));
        let err = rasterize(&src, u64::MAX).unwrap_err();
        assert!(matches!(err, ExtractError::Rasterization { .. }));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let src = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(rasterize(&src, 16).is_ok());
        let err = rasterize(&src, 15).unwrap_err();
        assert!(matches!(err, ExtractError::Rasterization { .. }));
    }
}
