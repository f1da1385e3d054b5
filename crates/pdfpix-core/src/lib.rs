//! Core library for extracting and browsing the images embedded in a PDF.
//!
//! This crate provides:
//! - PDF image extraction (page resources, form XObjects, sample decoding)
//! - The image folder (`images/image_NNNNNN.png`) and its scan order
//! - The startup phase tying extraction and scanning together
//! - A display-independent viewer state machine

pub mod config;
pub mod error;
pub mod extract;
pub mod pdf;
pub mod startup;
pub mod store;
pub mod viewer;

pub use config::{RunConfig, ViewerConfig};
pub use error::{ConfigError, PdfError, PdfPixError, Result, StoreError};
pub use extract::{ExtractionSummary, Progress, extract_images};
pub use pdf::{ImageSource, PageImage, PdfDocument};
pub use startup::{Prepared, prepare_images};
pub use store::{ImageDir, ImageSet};
pub use viewer::{Effect, ViewerEvent, ViewerState, transition};
