//! bpk - package buildpacks and extensions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Thin command-line front end over `bpk_core::Jam`. Tool locations,
//! target architecture and the temp root can be set with flags or the
//! matching `BPK_*` environment variables.

pub mod cmd;

use bpk_schema::Arch;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "bpk")]
#[command(author, version, about = "bpk - package buildpacks and extensions with jam and pack")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a buildpack or extension and package it as a file
    Package(PackageArgs),
    /// Report whether a source tree is a buildpack or an extension
    Detect {
        /// Buildpack or extension source directory
        source: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for `bpk package`.
#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Buildpack or extension source directory
    pub source: PathBuf,

    /// Where to write the packaged artifact
    #[arg(short, long)]
    pub output: PathBuf,

    /// Version to build (also names the intermediate tarball)
    #[arg(long)]
    pub version: String,

    /// Build without network access
    #[arg(long)]
    pub offline: bool,

    /// Builder executable
    #[arg(long, env = "BPK_JAM", default_value = "jam")]
    pub jam: String,

    /// Packaging executable
    #[arg(long, env = "BPK_PACK", default_value = "pack")]
    pub pack: String,

    /// Archive extractor executable
    #[arg(long, env = "BPK_TAR", default_value = "tar")]
    pub tar: String,

    /// Target architecture for buildpacks (defaults to the host)
    #[arg(long, env = "BPK_ARCH")]
    pub arch: Option<Arch>,

    /// Parent directory for temporary working directories
    #[arg(long, env = "BPK_TMPDIR")]
    pub temp_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_package() {
        let cli = Cli::parse_from([
            "bpk",
            "package",
            "./my-buildpack",
            "--output",
            "/tmp/out.cnb",
            "--version",
            "1.2.3",
            "--offline",
            "--arch",
            "aarch64",
        ]);
        let Commands::Package(args) = cli.command else {
            panic!("expected package command");
        };
        assert_eq!(args.source, PathBuf::from("./my-buildpack"));
        assert_eq!(args.output, PathBuf::from("/tmp/out.cnb"));
        assert_eq!(args.version, "1.2.3");
        assert!(args.offline);
        assert_eq!(args.arch, Some(Arch::Arm64));
    }

    #[test]
    fn test_package_requires_version() {
        let result = Cli::try_parse_from(["bpk", "package", ".", "--output", "out.cnb"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_arch() {
        let result = Cli::try_parse_from([
            "bpk", "package", ".", "-o", "out.cnb", "--version", "1", "--arch", "sparc",
        ]);
        assert!(result.is_err());
    }
}
