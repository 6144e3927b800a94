//! `bpk package`: build and package a source tree

use anyhow::{Context, Result};
use bpk_core::{Jam, SystemExecutable, SystemTempDir};
use bpk_schema::PackageRequest;

use crate::PackageArgs;

/// Build `args.source` with jam and package it with pack.
pub fn package(args: &PackageArgs) -> Result<()> {
    if !args.source.is_dir() {
        anyhow::bail!("Source directory does not exist: {}", args.source.display());
    }

    // pack runs inside a temp dir, so a relative output would land there.
    let output = std::path::absolute(&args.output)
        .with_context(|| format!("Invalid output path: {}", args.output.display()))?;

    let mut jam = Jam::new()
        .with_executable(SystemExecutable::new(&args.jam))
        .with_pack(SystemExecutable::new(&args.pack))
        .with_extractor(SystemExecutable::new(&args.tar));

    if let Some(arch) = args.arch {
        jam = jam.with_arch(arch);
    }

    if let Some(ref temp_dir) = args.temp_dir {
        std::fs::create_dir_all(temp_dir)
            .with_context(|| format!("Failed to create temp root {}", temp_dir.display()))?;
        jam = jam.with_temp_output(SystemTempDir::in_dir(temp_dir));
    }

    tracing::debug!(?jam, source = %args.source.display(), "packaging");

    let request =
        PackageRequest::new(&args.source, &output, &args.version).offline(args.offline);
    jam.package(&request)
        .with_context(|| format!("Failed to package {}", args.source.display()))?;

    println!("{}", output.display());
    Ok(())
}
