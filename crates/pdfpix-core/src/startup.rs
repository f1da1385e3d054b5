//! The extraction phase, run once before the viewer opens.

use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::extract::{ExtractionSummary, Progress, extract_images};
use crate::pdf::PdfDocument;
use crate::store::{ImageDir, ImageSet};

/// Images ready for viewing.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// What the viewer will show.
    pub images: ImageSet,
    /// `None` in buffered mode.
    pub extraction: Option<ExtractionSummary>,
}

/// Populate the image folder (unless buffered) and list its contents.
///
/// The PDF is opened before the folder is touched, so a document that fails
/// to parse leaves the previous run's images in place.
pub fn prepare_images(config: &RunConfig, progress: impl FnMut(Progress)) -> Result<Prepared> {
    let extraction = if config.buffered {
        info!("Using buffered images from {}", config.image_dir.display());
        None
    } else {
        let document = PdfDocument::open(&config.pdf_path)?;
        let dir = ImageDir::new(&config.image_dir);
        Some(extract_images(&document, &dir, progress)?)
    };

    let images = ImageSet::scan(&config.image_dir)?;
    Ok(Prepared { images, extraction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PdfError, PdfPixError};
    use crate::pdf::test_support::{PdfBuilder, rgb_image};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn config(pdf: &Path, images: &Path, buffered: bool) -> RunConfig {
        RunConfig::new(Some(pdf.to_path_buf()), buffered)
            .unwrap()
            .with_image_dir(images)
    }

    fn file_names(set: &ImageSet) -> Vec<String> {
        set.paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_extracts_two_page_document() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("doc.pdf");
        let data = PdfBuilder::new()
            .page(vec![
                ("Im0", rgb_image(4, 2, [255, 0, 0])),
                ("Im1", rgb_image(2, 4, [0, 255, 0])),
            ])
            .page(vec![("Im0", rgb_image(3, 3, [0, 0, 255]))])
            .finish();
        fs::write(&pdf, data).unwrap();

        let images = tmp.path().join("images");
        let prepared = prepare_images(&config(&pdf, &images, false), |_| {}).unwrap();

        assert_eq!(
            file_names(&prepared.images),
            vec!["image_000000.png", "image_000001.png", "image_000002.png"]
        );
        let dims: Vec<(u32, u32)> = prepared
            .images
            .paths()
            .iter()
            .map(|p| image::image_dimensions(p).unwrap())
            .collect();
        assert_eq!(dims, vec![(4, 2), (2, 4), (3, 3)]);
        assert_eq!(prepared.extraction.unwrap().pages, 2);
    }

    #[test]
    fn test_buffered_mode_leaves_folder_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("doc.pdf");
        fs::write(&pdf, b"not parsed in buffered mode").unwrap();

        let images = tmp.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("image_000000.png"), b"").unwrap();
        fs::write(images.join("hand-made.png"), b"").unwrap();

        let prepared = prepare_images(&config(&pdf, &images, true), |_| {}).unwrap();
        assert!(prepared.extraction.is_none());
        assert_eq!(
            file_names(&prepared.images),
            vec!["hand-made.png", "image_000000.png"]
        );
    }

    #[test]
    fn test_buffered_mode_without_folder_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("doc.pdf");
        fs::write(&pdf, b"%PDF").unwrap();

        let images = tmp.path().join("images");
        let prepared = prepare_images(&config(&pdf, &images, true), |_| {}).unwrap();
        assert!(prepared.images.is_empty());
        assert!(!images.exists());
    }

    #[test]
    fn test_corrupt_pdf_keeps_previous_images() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("doc.pdf");
        fs::write(&pdf, b"garbage").unwrap();

        let images = tmp.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("image_000000.png"), b"").unwrap();

        let err = prepare_images(&config(&pdf, &images, false), |_| {}).unwrap_err();
        assert!(matches!(err, PdfPixError::Pdf(PdfError::Parse(_))));
        assert!(images.join("image_000000.png").exists());
    }
}
