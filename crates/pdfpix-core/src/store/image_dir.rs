//! Writing side of the image folder.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, trace};

use super::glob_in;
use super::naming::{SCAN_PATTERN, image_file_name, parse_counter};
use crate::error::StoreError;

/// Output folder for one extraction run.
#[derive(Debug, Clone)]
pub struct ImageDir {
    path: PathBuf,
}

impl ImageDir {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the folder if needed and delete images left by a previous run.
    ///
    /// Only files matching the `image_NNNNNN.png` pattern are removed.
    /// Returns the number of files deleted.
    pub fn prepare(&self) -> Result<usize, StoreError> {
        fs::create_dir_all(&self.path).map_err(|source| StoreError::CreateDir {
            path: self.path.clone(),
            source,
        })?;

        let stale: Vec<PathBuf> = glob_in(&self.path, SCAN_PATTERN)?
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(parse_counter)
                    .is_some()
            })
            .collect();
        for path in &stale {
            trace!("Removing {}", path.display());
            fs::remove_file(path).map_err(|source| StoreError::Remove {
                path: path.clone(),
                source,
            })?;
        }

        debug!("Prepared {} ({} stale images removed)", self.path.display(), stale.len());
        Ok(stale.len())
    }

    /// Save `image` as PNG under the name for `counter`.
    pub fn write(&self, counter: usize, image: &DynamicImage) -> Result<PathBuf, StoreError> {
        let path = self.path.join(image_file_name(counter)?);

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        trace!("Wrote {}x{} image to {}", image.width(), image.height(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn pixel(r: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 3, Rgb([r, 0, 0])))
    }

    #[test]
    fn test_prepare_creates_missing_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ImageDir::new(tmp.path().join("images"));

        assert_eq!(dir.prepare().unwrap(), 0);
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_prepare_removes_only_owned_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ImageDir::new(tmp.path());

        dir.write(0, &pixel(1)).unwrap();
        dir.write(1, &pixel(2)).unwrap();
        fs::write(tmp.path().join("notes.txt"), "keep").unwrap();
        fs::write(tmp.path().join("cover.png"), "keep").unwrap();
        fs::write(tmp.path().join("image_7.png"), "keep").unwrap();
        fs::write(tmp.path().join("image_0000007.png"), "keep").unwrap();

        assert_eq!(dir.prepare().unwrap(), 2);

        let mut left: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec!["cover.png", "image_0000007.png", "image_7.png", "notes.txt"]
        );
    }

    #[test]
    fn test_write_png() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ImageDir::new(tmp.path());

        let path = dir.write(7, &pixel(200)).unwrap();
        assert_eq!(path, tmp.path().join("image_000007.png"));

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (2, 3));
        assert_eq!(back.get_pixel(1, 2), &Rgb([200, 0, 0]));
    }

    #[test]
    fn test_write_into_missing_folder_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ImageDir::new(tmp.path().join("absent"));

        let err = dir.write(0, &pixel(0)).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
