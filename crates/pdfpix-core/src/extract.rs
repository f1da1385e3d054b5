//! Page-by-page extraction of embedded images into the image folder.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::Result;
use crate::pdf::ImageSource;
use crate::store::ImageDir;

/// Progress notifications emitted while extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Extraction is about to start.
    Started { pages: u32 },
    /// A page has been fully written.
    PageDone { page: u32, images: usize },
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Pages visited.
    pub pages: u32,
    /// Files written, in counter order.
    pub files: Vec<PathBuf>,
    /// Images from a previous run that were deleted first.
    pub removed: usize,
}

/// Write every embedded image of `source` into `dir`.
///
/// The folder is created if needed and cleared of earlier `image_NNNNNN.png`
/// files. Pages are visited in order and the images of each page in the
/// order the source yields them; one counter runs across all pages. The first
/// error aborts the run, leaving the files written so far.
pub fn extract_images<S: ImageSource + ?Sized>(
    source: &S,
    dir: &ImageDir,
    mut progress: impl FnMut(Progress),
) -> Result<ExtractionSummary> {
    let removed = dir.prepare()?;
    let pages = source.page_count();
    progress(Progress::Started { pages });

    let mut files = Vec::new();
    for page in 1..=pages {
        let images = source.page_images(page)?;
        let count = images.len();

        for page_image in images {
            let path = dir.write(files.len(), &page_image.image)?;
            debug!("Page {} /{} -> {}", page, page_image.name, path.display());
            files.push(path);
        }

        progress(Progress::PageDone { page, images: count });
    }

    info!(
        "Extracted {} images from {} pages into {}",
        files.len(),
        pages,
        dir.path().display()
    );

    Ok(ExtractionSummary {
        pages,
        files,
        removed,
    })
}
