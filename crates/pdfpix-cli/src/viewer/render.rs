//! Decoding, fitting and uploading the image on screen.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use pdfpix_core::viewer::fit_within;
use tracing::{debug, warn};

/// `image` resampled to the largest size that fits `bounds`.
pub fn fitted_rgba(image: &DynamicImage, bounds: (u32, u32)) -> Option<RgbaImage> {
    let (w, h) = fit_within((image.width(), image.height()), bounds)?;
    Some(image.resize_exact(w, h, FilterType::Triangle).to_rgba8())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TextureKey {
    index: usize,
    size: (u32, u32),
}

/// The decoded current image and its uploaded, fitted texture.
///
/// Holds at most one image. Moving to another index or another viewport
/// size replaces the texture; the decoded pixels are kept until the index
/// changes or [`TextureCache::invalidate`] is called.
#[derive(Default)]
pub struct TextureCache {
    decoded: Option<(usize, Option<DynamicImage>)>,
    texture: Option<(TextureKey, egui::TextureHandle)>,
}

impl TextureCache {
    /// Drop everything so the next frame re-reads the file.
    pub fn invalidate(&mut self) {
        self.decoded = None;
        self.texture = None;
    }

    /// Texture for image `index` fitted to `bounds` (in pixels).
    ///
    /// Returns `None` when the file cannot be decoded or the viewport is
    /// empty.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        index: usize,
        path: &Path,
        bounds: (u32, u32),
    ) -> Option<&egui::TextureHandle> {
        if self.decoded.as_ref().map(|(i, _)| *i) != Some(index) {
            self.texture = None;
            self.decoded = Some((index, load(path)));
        }
        let image = self.decoded.as_ref()?.1.as_ref()?;

        let (w, h) = fit_within((image.width(), image.height()), bounds)?;
        let key = TextureKey { index, size: (w, h) };
        if self.texture.as_ref().map(|(k, _)| *k) != Some(key) {
            let rgba = fitted_rgba(image, bounds)?;
            let pixels = egui::ColorImage::from_rgba_unmultiplied(
                [rgba.width() as usize, rgba.height() as usize],
                rgba.as_raw(),
            );
            let handle = ctx.load_texture(
                format!("image_{index}"),
                pixels,
                egui::TextureOptions::LINEAR,
            );
            debug!("Uploaded {} at {}x{}", path.display(), w, h);
            self.texture = Some((key, handle));
        }

        self.texture.as_ref().map(|(_, handle)| handle)
    }
}

fn load(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_fitted_rgba_keeps_aspect() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([9, 8, 7])));

        let fitted = fitted_rgba(&image, (50, 50)).unwrap();
        assert_eq!(fitted.dimensions(), (50, 25));
        assert_eq!(fitted.get_pixel(10, 10).0, [9, 8, 7, 255]);

        let upscaled = fitted_rgba(&image, (800, 800)).unwrap();
        assert_eq!(upscaled.dimensions(), (800, 400));
    }

    #[test]
    fn test_fitted_rgba_empty_viewport() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert!(fitted_rgba(&image, (0, 300)).is_none());
    }

    #[test]
    fn test_load_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_000000.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(load(&path).is_none());
        assert!(load(&dir.path().join("missing.png")).is_none());
    }
}
