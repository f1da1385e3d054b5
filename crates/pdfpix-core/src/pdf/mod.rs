//! PDF processing module.

mod decode;
mod document;

pub use document::PdfDocument;

#[cfg(test)]
pub(crate) use document::test_support;

use crate::error::PdfError;
use image::DynamicImage;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// One decoded image from a page.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Resource name the image is registered under, e.g. `Im0`.
    /// Images reached through a form XObject are prefixed with the form's
    /// name (`Fm0/Im0`).
    pub name: String,
    /// Decoded pixels.
    pub image: DynamicImage,
}

/// Anything that can hand out the embedded images of a paged document.
///
/// Both the order of pages and the order of images within a page must be
/// stable: the extractor numbers files in exactly the order returned here.
pub trait ImageSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Decoded images of a page (1-indexed), in the page's own order.
    fn page_images(&self, page: u32) -> Result<Vec<PageImage>>;
}
