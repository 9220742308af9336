//! Scratch build directory lifecycle.
//!
//! Native build systems cache toolchain and flag decisions in the build
//! directory, so every run starts from an empty one. Nothing here is
//! incremental.

use std::fs;
use std::io;
use std::path::Path;

use crate::types::BuildError;

/// Resets the scratch workspace at `path`.
///
/// Whatever currently sits at `path` is removed (a directory tree, a plain
/// file, or a symlink, which is unlinked rather than followed), then an empty
/// directory is created. A missing `path` is not an error. Missing parent
/// directories are created.
pub fn reset_scratch_dir(path: &Path) -> Result<(), BuildError> {
    remove_scratch_dir(path)?;
    fs::create_dir_all(path).map_err(|e| {
        BuildError::Io(io::Error::new(
            e.kind(),
            format!("failed to create scratch directory {}: {}", path.display(), e),
        ))
    })?;
    Ok(())
}

/// Removes the scratch workspace at `path` if anything is there.
///
/// Returns `true` if something was removed.
pub fn remove_scratch_dir(path: &Path) -> Result<bool, BuildError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| {
        BuildError::Io(io::Error::new(
            e.kind(),
            format!("failed to remove scratch directory {}: {}", path.display(), e),
        ))
    })?;
    Ok(true)
}
