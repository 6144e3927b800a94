//! Buildpack and extension packaging with `jam` and `pack`.
//!
//! A run goes through four steps:
//!
//! 1. Detect the artifact kind from the descriptor in the source tree.
//! 2. `jam pack` compiles the source into `<version>.tgz` in a temp dir.
//! 3. The tarball is unpacked (`tar -xvf`) into a second temp dir.
//! 4. `pack buildpack package` (or `pack extension package`) runs inside
//!    that directory and writes the final artifact.
//!
//! Both temp dirs are [`ScopedDir`]s, so they are gone when [`Jam::package`]
//! returns regardless of which step failed.

use std::io;
use std::path::Path;

use bpk_schema::{Arch, ArtifactKind, PackageRequest, Platform};

use crate::detect::{self, descriptor_path};
use crate::error::PackageError;
use crate::exec::{Executable, Execution, SystemExecutable};
use crate::tempdir::{ScopedDir, SystemTempDir, TempDirAllocator};

/// Existence check: `Ok(false)` for absent, `Err` when it cannot tell.
type ExistsCheck = Box<dyn Fn(&Path) -> io::Result<bool>>;

/// Prefix of the directory the intermediate tarball is unpacked into.
const BUILD_DIR_PREFIX: &str = "build";

/// Anything that can turn a source tree into a packaged artifact.
pub trait Packager {
    /// Package `source_dir` into `output` at `version`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the stage that failed.
    fn execute(
        &self,
        source_dir: &Path,
        output: &Path,
        version: &str,
        offline: bool,
    ) -> Result<(), PackageError>;
}

/// Packages sources by driving `jam` and then `pack`.
///
/// Every collaborator can be replaced:
///
/// ```no_run
/// use bpk_core::{Jam, SystemExecutable};
/// use bpk_schema::{Arch, PackageRequest};
///
/// let jam = Jam::new()
///     .with_executable(SystemExecutable::new("/opt/jam/bin/jam"))
///     .with_arch(Arch::Arm64);
/// jam.package(&PackageRequest::new("my-buildpack", "out/my-buildpack.cnb", "1.0.0"))?;
/// # Ok::<(), bpk_core::PackageError>(())
/// ```
pub struct Jam {
    executable: Box<dyn Executable>,
    pack: Box<dyn Executable>,
    extractor: Box<dyn Executable>,
    temp_output: Box<dyn TempDirAllocator>,
    exists: ExistsCheck,
    arch: Option<Arch>,
}

impl std::fmt::Debug for Jam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jam")
            .field("arch", &self.arch)
            .finish_non_exhaustive()
    }
}

impl Default for Jam {
    fn default() -> Self {
        Self::new()
    }
}

impl Jam {
    /// `jam`, `pack` and `tar` from `PATH`, system temp dirs, host architecture.
    pub fn new() -> Self {
        Self {
            executable: Box::new(SystemExecutable::new("jam")),
            pack: Box::new(SystemExecutable::new("pack")),
            extractor: Box::new(SystemExecutable::new("tar")),
            temp_output: Box::new(SystemTempDir::new()),
            exists: Box::new(detect::exists),
            arch: Arch::current(),
        }
    }

    /// Replace the builder tool.
    pub fn with_executable(mut self, executable: impl Executable + 'static) -> Self {
        self.executable = Box::new(executable);
        self
    }

    /// Replace the packaging tool.
    pub fn with_pack(mut self, pack: impl Executable + 'static) -> Self {
        self.pack = Box::new(pack);
        self
    }

    /// Replace the archive extractor (invoked as `-xvf <tarball>`).
    pub fn with_extractor(mut self, extractor: impl Executable + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the temp-directory allocator used for both working dirs.
    pub fn with_temp_output(mut self, temp_output: impl TempDirAllocator + 'static) -> Self {
        self.temp_output = Box::new(temp_output);
        self
    }

    /// Replace the existence check used for the extension descriptor and
    /// the intermediate tarball. Errors count as "absent".
    pub fn with_exists_check(
        mut self,
        exists: impl Fn(&Path) -> io::Result<bool> + 'static,
    ) -> Self {
        self.exists = Box::new(exists);
        self
    }

    /// Target this architecture instead of the host's. `None` leaves
    /// buildpacks without a target platform.
    pub fn with_arch(mut self, arch: impl Into<Option<Arch>>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Build and package one source tree.
    ///
    /// `pack` runs inside the build directory, so a relative output path
    /// resolves there and is deleted with it. Pass an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::TempDir`] if a working directory cannot be
    /// created, [`PackageError::UnsupportedArch`] if a buildpack has no
    /// target platform, and [`PackageError::Build`],
    /// [`PackageError::Extract`] or [`PackageError::Package`] if the
    /// corresponding tool fails.
    pub fn package(&self, request: &PackageRequest) -> Result<(), PackageError> {
        let jam_output = ScopedDir::allocate(self.temp_output.as_ref(), None, "").map_err(
            |source| PackageError::TempDir {
                purpose: "jam output",
                source,
            },
        )?;

        let kind = detect::detect_kind_with(request.source_dir(), &self.exists);
        let platform = if kind.supports_target() {
            Some(self.platform()?)
        } else {
            None
        };

        let tarball = jam_output.path().join(request.tarball_name());

        tracing::info!(
            "Building {kind} {} from {}",
            request.version(),
            request.source_dir().display()
        );
        let args = builder_args(kind, request, &tarball);
        self.executable
            .execute(&Execution::new(args))
            .map_err(PackageError::Build)?;

        let build_dir = ScopedDir::allocate(self.temp_output.as_ref(), None, BUILD_DIR_PREFIX)
            .map_err(|source| PackageError::TempDir {
                purpose: "build",
                source,
            })?;

        if tarball_present(self.exists.as_ref(), &tarball) {
            tracing::debug!(tarball = %tarball.display(), "extracting jam output");
            self.extractor
                .execute(&Execution::new(extract_args(&tarball)).dir(build_dir.path()))
                .map_err(PackageError::Extract)?;
        } else {
            tracing::warn!(
                tarball = %tarball.display(),
                "jam produced no tarball, packaging an empty directory"
            );
        }

        tracing::info!("Packaging {kind} to {}", request.output().display());
        let args = packager_args(kind, request.output(), platform);
        let result = self
            .pack
            .execute(&Execution::new(args).dir(build_dir.path()))
            .map_err(PackageError::Package);

        drop(build_dir);
        result
    }

    fn platform(&self) -> Result<Platform, PackageError> {
        self.arch
            .map(Platform::linux)
            .ok_or(PackageError::UnsupportedArch(std::env::consts::ARCH))
    }
}

impl Packager for Jam {
    fn execute(
        &self,
        source_dir: &Path,
        output: &Path,
        version: &str,
        offline: bool,
    ) -> Result<(), PackageError> {
        self.package(&PackageRequest::new(source_dir, output, version).offline(offline))
    }
}

/// `jam pack` arguments.
fn builder_args(kind: ArtifactKind, request: &PackageRequest, tarball: &Path) -> Vec<String> {
    let mut args = vec![
        "pack".to_string(),
        kind.builder_flag().to_string(),
        path_arg(&descriptor_path(request.source_dir(), kind)),
        "--output".to_string(),
        path_arg(tarball),
        "--version".to_string(),
        request.version().to_string(),
    ];

    if request.is_offline() {
        args.push("--offline".to_string());
    }

    args
}

/// `pack <kind> package` arguments, with `--target` when a platform is given.
fn packager_args(kind: ArtifactKind, output: &Path, platform: Option<Platform>) -> Vec<String> {
    let mut args = vec![
        kind.package_subcommand().to_string(),
        "package".to_string(),
        path_arg(output),
        "--format".to_string(),
        "file".to_string(),
    ];

    if let Some(platform) = platform {
        args.push("--target".to_string());
        args.push(platform.to_string());
    }

    args
}

fn extract_args(tarball: &Path) -> Vec<String> {
    vec!["-xvf".to_string(), path_arg(tarball)]
}

fn tarball_present(exists: &dyn Fn(&Path) -> io::Result<bool>, tarball: &Path) -> bool {
    exists(tarball).unwrap_or_else(|e| {
        tracing::warn!(tarball = %tarball.display(), "could not check for jam output: {e}");
        false
    })
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
