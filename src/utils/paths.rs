use std::fs;
use std::io;
use std::path::Path;

/// Create `path` as a single directory level if it does not already exist
///
/// Returns `true` if the directory was created by this call. A concurrent
/// creator winning the race counts as pre-existence.
///
/// # Errors
///
/// Returns an error if the directory cannot be created for any reason other
/// than already existing (missing parent, permissions, a file in the way).
pub fn ensure_directory(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}
