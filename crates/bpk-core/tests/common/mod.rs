//! Fakes shared by the packaging integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bpk_core::{ExecError, Executable, Execution};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

type Effect = Rc<dyn Fn(&Execution) -> Result<(), ExecError>>;

/// Records every execution and optionally runs a side effect.
///
/// Clones share their call log, so a test can hand one clone to `Jam` and
/// inspect the other afterwards.
#[derive(Clone)]
pub struct FakeExecutable {
    name: &'static str,
    calls: Rc<RefCell<Vec<Execution>>>,
    effect: Option<Effect>,
}

impl FakeExecutable {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Rc::default(),
            effect: None,
        }
    }

    /// Run `effect` on each execution; its result becomes the call's result.
    pub fn with_effect(
        mut self,
        effect: impl Fn(&Execution) -> Result<(), ExecError> + 'static,
    ) -> Self {
        self.effect = Some(Rc::new(effect));
        self
    }

    /// Exit with `code` on every execution.
    pub fn failing(self, code: i32) -> Self {
        let name = self.name;
        self.with_effect(move |execution| {
            Err(ExecError::Failed {
                program: name.to_string(),
                args: execution.args.join(" "),
                code: Some(code),
            })
        })
    }

    pub fn calls(&self) -> Vec<Execution> {
        self.calls.borrow().clone()
    }

    pub fn only_call(&self) -> Execution {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "{} expected exactly one call", self.name);
        calls.into_iter().next().unwrap()
    }
}

impl Executable for FakeExecutable {
    fn execute(&self, execution: &Execution) -> Result<(), ExecError> {
        self.calls.borrow_mut().push(execution.clone());
        match &self.effect {
            Some(effect) => effect(execution),
            None => Ok(()),
        }
    }
}

/// Allocates temp dirs under a test-owned root and remembers each one.
#[derive(Clone, Default)]
pub struct RecordingAllocator {
    root: PathBuf,
    allocated: Rc<RefCell<Vec<(String, PathBuf)>>>,
}

impl RecordingAllocator {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            allocated: Rc::default(),
        }
    }

    /// `(prefix, path)` for every directory handed out, in order.
    pub fn allocated(&self) -> Vec<(String, PathBuf)> {
        self.allocated.borrow().clone()
    }
}

impl bpk_core::TempDirAllocator for RecordingAllocator {
    fn make_temp_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf> {
        let parent = parent.unwrap_or(&self.root);
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)?
            .keep();
        self.allocated
            .borrow_mut()
            .push((prefix.to_string(), dir.clone()));
        Ok(dir)
    }
}

/// Value following `flag` in an argument list.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Write a gzip tarball containing `files` (name, contents).
pub fn write_tarball(path: &Path, files: &[(&str, &str)]) -> io::Result<()> {
    let encoder = GzEncoder::new(File::create(path)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, contents.as_bytes())?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

/// A builder that writes a tarball to its `--output` argument.
pub fn tarball_writing_builder(files: &'static [(&'static str, &'static str)]) -> FakeExecutable {
    FakeExecutable::new("jam").with_effect(move |execution| {
        let output = flag_value(&execution.args, "--output").expect("--output present");
        write_tarball(Path::new(output), files).map_err(|source| ExecError::Spawn {
            program: "jam".to_string(),
            source,
        })
    })
}

/// An extractor that understands `-xvf <tarball>` with a working directory.
pub fn unpacking_extractor() -> FakeExecutable {
    FakeExecutable::new("tar").with_effect(|execution| {
        let tarball = flag_value(&execution.args, "-xvf").expect("-xvf present");
        let dir = execution.dir.as_deref().expect("extractor runs in a directory");
        let unpack = || -> io::Result<()> {
            let mut archive = tar::Archive::new(GzDecoder::new(File::open(tarball)?));
            archive.unpack(dir)
        };
        unpack().map_err(|source| ExecError::Spawn {
            program: "tar".to_string(),
            source,
        })
    })
}

/// A source tree containing only the given descriptor.
pub fn source_tree(root: &Path, descriptor: &str) -> PathBuf {
    let dir = root.join("source");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(descriptor), "api = \"0.8\"\n").unwrap();
    dir
}
