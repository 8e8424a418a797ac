//! Directory Walker - finds every manifest under a root

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::MANIFEST_FILE_NAME;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Servers directory not found: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to scan servers directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Recursively collect every file named exactly `manifest.json`.
///
/// Symlinked directories and manifests are followed. Order follows the
/// filesystem; callers must not rely on it.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }

    let mut manifests = vec![];
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME {
            manifests.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = manifests.len(), "found manifests");
    Ok(manifests)
}
