//! Errors for subprocess execution and packaging runs.

use thiserror::Error;

/// Failure to run an external tool.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be located on `PATH`.
    #[error("{program}: executable not found")]
    NotFound {
        /// Program name as configured
        program: String,
    },

    /// The program was found but could not be started.
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// Program name as configured
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{program} {args}` failed with exit code: {code:?}")]
    Failed {
        /// Program name as configured
        program: String,
        /// Space-joined argument list
        args: String,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
    },
}

/// Failure of a packaging run, tagged with the stage that failed.
#[derive(Error, Debug)]
pub enum PackageError {
    /// A temporary working directory could not be created.
    #[error("Failed to create temporary {purpose} directory: {source}")]
    TempDir {
        /// Which directory (`"jam output"` or `"build"`)
        purpose: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The host architecture has no packaging-tool name and none was given.
    #[error("No target platform for host architecture {0}; pass an explicit architecture")]
    UnsupportedArch(&'static str),

    /// The builder tool failed.
    #[error("Build failed: {0}")]
    Build(#[source] ExecError),

    /// Unpacking the intermediate tarball failed.
    #[error("Extracting build output failed: {0}")]
    Extract(#[source] ExecError),

    /// The packaging tool failed.
    #[error("Packaging failed: {0}")]
    Package(#[source] ExecError),
}
