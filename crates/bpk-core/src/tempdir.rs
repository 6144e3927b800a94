//! Temporary working directories.
//!
//! Allocation goes through [`TempDirAllocator`] so tests can root every
//! directory somewhere observable. Whatever allocates it, a directory is
//! owned by a [`ScopedDir`] which removes it when dropped, on success and
//! error paths alike.

use std::io;
use std::path::{Path, PathBuf};

/// Creates uniquely named, empty directories.
pub trait TempDirAllocator {
    /// Create a directory under `parent` (an allocator default when `None`)
    /// whose name starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn make_temp_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf>;
}

impl<F> TempDirAllocator for F
where
    F: Fn(Option<&Path>, &str) -> io::Result<PathBuf>,
{
    fn make_temp_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf> {
        self(parent, prefix)
    }
}

/// Allocates under the system temp directory, or a configured root.
#[derive(Debug, Clone, Default)]
pub struct SystemTempDir {
    root: Option<PathBuf>,
}

impl SystemTempDir {
    /// Allocate under `std::env::temp_dir()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate under `root` when the caller gives no parent.
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl TempDirAllocator for SystemTempDir {
    fn make_temp_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf> {
        let parent = parent
            .or(self.root.as_deref())
            .map_or_else(std::env::temp_dir, Path::to_path_buf);

        let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(parent)?;
        Ok(dir.keep())
    }
}

/// A directory removed, with everything in it, when this guard drops.
#[derive(Debug)]
pub struct ScopedDir {
    path: PathBuf,
}

impl ScopedDir {
    /// Allocate a directory and take ownership of it.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error unchanged.
    pub fn allocate(
        allocator: &dyn TempDirAllocator,
        parent: Option<&Path>,
        prefix: &str,
    ) -> io::Result<Self> {
        let path = allocator.make_temp_dir(parent, prefix)?;
        tracing::debug!(path = %path.display(), "allocated temp dir");
        Ok(Self { path })
    }

    /// Root path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temp dir"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                "failed to remove temp dir: {e}"
            ),
        }
    }
}
