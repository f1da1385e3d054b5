//! Reading side of the image folder.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::glob_in;
use super::naming::SCAN_PATTERN;
use crate::error::StoreError;

/// Ordered list of image files shown by the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    paths: Vec<PathBuf>,
}

impl ImageSet {
    /// Collect every `*.png` in `dir`, sorted by name.
    ///
    /// A missing folder is an empty set, not an error.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let paths = glob_in(dir, SCAN_PATTERN)?;
        debug!("Found {} images in {}", paths.len(), dir.display());
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}
