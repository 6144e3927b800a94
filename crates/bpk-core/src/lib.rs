//! Core library for `bpk`.
//!
//! Packages buildpack and extension source trees by running `jam` to build
//! an intermediate tarball and `pack` to turn it into a distributable
//! artifact. See [`jam`] for the sequence of steps.

pub mod detect;
pub mod error;
pub mod exec;
pub mod jam;
pub mod tempdir;

pub use error::{ExecError, PackageError};
pub use exec::{Executable, Execution, SystemExecutable};
pub use jam::{Jam, Packager};
pub use tempdir::{ScopedDir, SystemTempDir, TempDirAllocator};
