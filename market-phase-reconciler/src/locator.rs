//! Snapshot file selection
//!
//! Picks the newest ("current") and second-newest ("previous") snapshot from
//! an input directory. File names are not interpreted; only modification
//! time matters.

use crate::types::{ReconcileError, Result, SnapshotFile};
use std::fs;
use std::path::Path;

/// Current and previous snapshot selected from one directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPair {
    pub current: SnapshotFile,
    pub previous: Option<SnapshotFile>,
}

/// List all regular files in `dir`, newest modification time first
///
/// Subdirectories are excluded. The sort is stable, so files with equal
/// modification times keep the order in which the directory listing
/// returned them.
pub fn list_candidates(dir: &Path) -> Result<Vec<SnapshotFile>> {
    if !dir.is_dir() {
        return Err(ReconcileError::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        // Follows symlinks, so a link to a file counts as a file
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipping unreadable entry {:?}: {}", path, e);
                continue;
            }
        };
        if metadata.is_dir() {
            continue;
        }

        files.push(SnapshotFile::new(path, metadata.modified()?));
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));

    log::debug!("Found {} candidate snapshot(s) in {:?}", files.len(), dir);
    Ok(files)
}

/// Find the newest file in `dir`
pub fn find_latest(dir: &Path) -> Result<Option<SnapshotFile>> {
    Ok(list_candidates(dir)?.into_iter().next())
}

/// Find the second-newest file in `dir` (source of previous signals)
pub fn find_previous(dir: &Path) -> Result<Option<SnapshotFile>> {
    Ok(list_candidates(dir)?.into_iter().nth(1))
}

/// Select current and previous snapshot from a single listing
///
/// Fails with [`ReconcileError::NoFilesFound`] when the directory holds no
/// regular files.
pub fn locate(dir: &Path) -> Result<SnapshotPair> {
    let mut files = list_candidates(dir)?.into_iter();
    let current = files
        .next()
        .ok_or_else(|| ReconcileError::NoFilesFound(dir.to_path_buf()))?;
    let previous = files.next();

    log::info!(
        "Current snapshot: {:?}, previous: {:?}",
        current.path,
        previous.as_ref().map(|p| &p.path)
    );

    Ok(SnapshotPair { current, previous })
}
