//! Run and viewer configuration.
//!
//! There is no configuration file. A [`RunConfig`] is built once from the
//! command line and validated before any side effect takes place.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::store::DEFAULT_IMAGE_DIR;

/// What a single run of the program does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// PDF to extract images from.
    pub pdf_path: PathBuf,

    /// Skip extraction and reuse whatever is already in `image_dir`.
    pub buffered: bool,

    /// Folder the images are written to and read back from.
    pub image_dir: PathBuf,
}

impl RunConfig {
    /// Validate command-line input into a run configuration.
    ///
    /// Only reads file metadata; never creates or deletes anything.
    pub fn new(pdf_path: Option<PathBuf>, buffered: bool) -> Result<Self, ConfigError> {
        let pdf_path = pdf_path.ok_or(ConfigError::MissingPdf)?;

        if !pdf_path.exists() {
            return Err(ConfigError::PdfNotFound(pdf_path));
        }
        if !pdf_path.is_file() {
            return Err(ConfigError::NotAFile(pdf_path));
        }

        Ok(Self {
            pdf_path,
            buffered,
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
        })
    }

    /// Use a different image folder.
    pub fn with_image_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.image_dir = dir.as_ref().to_path_buf();
        self
    }
}

/// Window settings for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Base window title; the position readout is appended to it.
    pub title: String,

    /// Initial inner size in points.
    pub initial_size: [f32; 2],

    /// Minimum inner size in points.
    pub min_size: [f32; 2],

    /// Start with the stay-on-top hint set.
    pub always_on_top: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "PDF Image Viewer".to_string(),
            initial_size: [1024.0, 768.0],
            min_size: [200.0, 150.0],
            always_on_top: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_pdf() {
        let err = RunConfig::new(None, false).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPdf));
        assert_eq!(err.to_string(), "missing PDF file");
    }

    #[test]
    fn test_nonexistent_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.pdf");

        let err = RunConfig::new(Some(path.clone()), false).unwrap_err();
        assert!(matches!(err, ConfigError::PdfNotFound(ref p) if *p == path));
        assert!(err.to_string().ends_with("does not exist"));
    }

    #[test]
    fn test_directory_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunConfig::new(Some(dir.path().to_path_buf()), true).unwrap_err();
        assert!(matches!(err, ConfigError::NotAFile(_)));
    }

    #[test]
    fn test_valid_config_uses_default_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.5").unwrap();

        let config = RunConfig::new(Some(path.clone()), true).unwrap();
        assert_eq!(config.pdf_path, path);
        assert!(config.buffered);
        assert_eq!(config.image_dir, PathBuf::from("images"));

        let moved = config.with_image_dir(dir.path().join("out"));
        assert_eq!(moved.image_dir, dir.path().join("out"));
    }

    #[test]
    fn test_viewer_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.title, "PDF Image Viewer");
        assert!(!config.always_on_top);
    }
}
