//! The image folder shared by the extractor and the viewer.
//!
//! The folder is the only thing the two phases have in common, so its
//! layout is a fixed contract (see [`naming`]): files are named
//! `image_NNNNNN.png` with a six-digit zero-padded counter, which makes the
//! lexicographic order of the names equal to extraction order.

pub mod naming;

mod image_dir;
mod image_set;

pub use image_dir::ImageDir;
pub use image_set::ImageSet;
pub use naming::{COUNTER_WIDTH, DEFAULT_IMAGE_DIR, MAX_COUNTER, image_file_name};

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::trace;

use crate::error::StoreError;

/// List the files in `dir` whose names match a glob `pattern`.
///
/// `dir` is escaped, so only `pattern` is interpreted. Entries that cannot
/// be read are skipped. A missing directory yields an empty list.
fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, StoreError> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);

    let mut paths: Vec<PathBuf> = glob(&full.to_string_lossy())?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    trace!("{} matched {} files", full.display(), paths.len());
    Ok(paths)
}
