//! Artifact kind detection.

use std::io;
use std::path::{Path, PathBuf};

use bpk_schema::{ArtifactKind, EXTENSION_DESCRIPTOR};

/// Whether `path` exists, distinguishing "absent" from "could not tell".
///
/// # Errors
///
/// Returns an error if the filesystem cannot answer (e.g. permission denied
/// on a parent directory).
pub fn exists(path: &Path) -> io::Result<bool> {
    path.try_exists()
}

/// Classify a source tree by its descriptor file.
///
/// An `extension.toml` makes it an extension; anything else, including a
/// check that errors, makes it a buildpack.
pub fn detect_kind(source_dir: &Path) -> ArtifactKind {
    detect_kind_with(source_dir, exists)
}

/// [`detect_kind`] with a caller-supplied existence check.
pub fn detect_kind_with<P>(source_dir: &Path, exists: P) -> ArtifactKind
where
    P: Fn(&Path) -> io::Result<bool>,
{
    let extension_toml = source_dir.join(EXTENSION_DESCRIPTOR);
    match exists(&extension_toml) {
        Ok(true) => ArtifactKind::Extension,
        Ok(false) => ArtifactKind::Buildpack,
        Err(e) => {
            tracing::warn!(
                path = %extension_toml.display(),
                "could not check for extension descriptor, assuming buildpack: {e}"
            );
            ArtifactKind::Buildpack
        }
    }
}

/// Path of the descriptor the builder tool is pointed at.
pub fn descriptor_path(source_dir: &Path, kind: ArtifactKind) -> PathBuf {
    source_dir.join(kind.descriptor())
}
