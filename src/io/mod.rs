//! Storage backend access for FDD image files

/// Storage backend contract
pub mod backend;

pub use backend::ImageFile;

use crate::error::{FddError, Result};
use crate::format::{DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_NAME, FDD_EXTENSION};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Open an image file for reading
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path)
        .map_err(|e| FddError::backend(format!("cannot open {}: {}", path.display(), e)))
}

/// Check if a file is likely an FDD image based on extension
pub fn is_fdd_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(FDD_EXTENSION))
        .unwrap_or(false)
}

/// Conventional image location below a mounted volume root
pub fn default_image_path<P: AsRef<Path>>(root: P) -> PathBuf {
    root.as_ref().join(DEFAULT_IMAGE_DIR).join(DEFAULT_IMAGE_NAME)
}
