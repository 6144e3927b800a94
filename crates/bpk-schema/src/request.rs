//! The input to a single packaging run.

use std::path::{Path, PathBuf};

/// Everything needed to package one source tree.
///
/// # Example
///
/// ```
/// use bpk_schema::PackageRequest;
///
/// let request = PackageRequest::new("src/my-buildpack", "out/my-buildpack.cnb", "1.2.3")
///     .offline(true);
/// assert_eq!(request.tarball_name(), "1.2.3.tgz");
/// assert!(request.is_offline());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    source_dir: PathBuf,
    output: PathBuf,
    version: String,
    offline: bool,
}

impl PackageRequest {
    /// Create an online request.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            version: version.into(),
            offline: false,
        }
    }

    /// Ask the builder tool to run without network access.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Buildpack or extension source tree.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Where the final artifact is written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Version string embedded in the artifact.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the builder tool runs offline.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// File name of the builder tool's intermediate tarball: `<version>.tgz`.
    pub fn tarball_name(&self) -> String {
        format!("{}.tgz", self.version)
    }
}
