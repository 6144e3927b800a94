//! `bpk detect`: classify a source tree

use anyhow::Result;
use bpk_core::detect::{descriptor_path, detect_kind};
use bpk_schema::ArtifactKind;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct Detection {
    kind: ArtifactKind,
    descriptor: PathBuf,
    descriptor_present: bool,
}

/// Print the artifact kind of `source` and the descriptor jam would be given.
pub fn detect(source: &Path, json: bool) -> Result<()> {
    if !source.is_dir() {
        anyhow::bail!("Source directory does not exist: {}", source.display());
    }

    let kind = detect_kind(source);
    let descriptor = descriptor_path(source, kind);
    let detection = Detection {
        kind,
        descriptor_present: descriptor.is_file(),
        descriptor,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        println!("{}\t{}", detection.kind, detection.descriptor.display());
        if !detection.descriptor_present {
            eprintln!("warning: {} not found", detection.descriptor.display());
        }
    }

    Ok(())
}
