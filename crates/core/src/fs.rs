//! Filesystem helpers for locating the dataset

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::get_xdg_data_dir;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path points at a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Locate a dataset file.
///
/// The configured path wins when it exists. Otherwise the file name is looked
/// up in the XDG data directory ($XDG_DATA_HOME/climate-api/ or
/// ~/.local/share/climate-api/).
pub fn find_data_file(configured: &str) -> Option<PathBuf> {
    if is_file(configured) {
        return Some(PathBuf::from(configured));
    }

    let file_name = Path::new(configured).file_name()?;
    let candidate = get_xdg_data_dir().join(file_name);
    debug!("{} not found, trying {}", configured, candidate.display());
    if candidate.is_file() {
        Some(candidate)
    } else {
        None
    }
}
