//! Error types for the pdfpix-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pdfpix library.
#[derive(Error, Debug)]
pub enum PdfPixError {
    /// Invalid invocation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Image folder error.
    #[error("image folder error: {0}")]
    Store(#[from] StoreError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the arguments the program was started with.
///
/// These are raised before anything touches the file system.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No PDF path was given.
    #[error("missing PDF file")]
    MissingPdf,

    /// The PDF path does not exist.
    #[error("PDF file '{}' does not exist", .0.display())]
    PdfNotFound(PathBuf),

    /// The PDF path exists but is not a regular file.
    #[error("PDF file '{}' is not a file", .0.display())]
    NotAFile(PathBuf),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and the empty password does not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// An image XObject could not be turned into pixels.
    #[error("page {page}, image /{name}: {reason}")]
    UnsupportedImage {
        page: u32,
        name: String,
        reason: String,
    },
}

/// Errors related to the on-disk image folder.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The output directory could not be created.
    #[error("cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stale image could not be removed.
    #[error("cannot remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An extracted image could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The directory path could not be turned into a glob pattern.
    #[error("invalid image pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The counter no longer fits the fixed-width file name.
    #[error("too many images: counter {0} exceeds the six-digit file name limit")]
    CounterOverflow(usize),
}

/// Result type for the pdfpix library.
pub type Result<T> = std::result::Result<T, PdfPixError>;
