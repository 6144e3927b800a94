//! External tool execution.
//!
//! Every tool `bpk` drives (the builder, the archive extractor, the packaging
//! tool) is reached through the [`Executable`] trait so callers can swap in
//! fakes. [`SystemExecutable`] is the real implementation: it resolves the
//! program on `PATH`, inherits the host's stdout/stderr so tool output streams
//! live, and blocks until the child exits.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ExecError;

/// One invocation of an external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// Arguments, not including the program name
    pub args: Vec<String>,
    /// Working directory; the caller's when `None`
    pub dir: Option<PathBuf>,
}

impl Execution {
    /// Create an execution in the caller's working directory.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
        }
    }

    /// Set the working directory for the execution.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

/// Something that can run an [`Execution`] to completion.
pub trait Executable {
    /// Run the execution, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be started or exits unsuccessfully.
    fn execute(&self, execution: &Execution) -> Result<(), ExecError>;
}

/// A program on the host, looked up on `PATH` at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemExecutable {
    name: String,
}

impl SystemExecutable {
    /// Wrap a program name or path (`"jam"`, `"/usr/local/bin/pack"`).
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Executable for SystemExecutable {
    fn execute(&self, execution: &Execution) -> Result<(), ExecError> {
        let program = which::which(&self.name).map_err(|_| ExecError::NotFound {
            program: self.name.clone(),
        })?;

        tracing::debug!(
            program = %program.display(),
            args = ?execution.args,
            dir = ?execution.dir,
            "running"
        );

        let mut cmd = Command::new(&program);
        cmd.args(&execution.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = execution.dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|source| ExecError::Spawn {
            program: self.name.clone(),
            source,
        })?;

        if !status.success() {
            return Err(ExecError::Failed {
                program: self.name.clone(),
                args: execution.args.join(" "),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_builder() {
        let execution = Execution::new(["-xvf", "/tmp/1.0.0.tgz"]).dir("/tmp/build");
        assert_eq!(execution.args, vec!["-xvf", "/tmp/1.0.0.tgz"]);
        assert_eq!(execution.dir, Some(PathBuf::from("/tmp/build")));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let exe = SystemExecutable::new("bpk-definitely-not-a-real-program");
        let err = exe.execute(&Execution::new(["--help"])).unwrap_err();
        assert!(matches!(err, ExecError::NotFound { ref program } if program == "bpk-definitely-not-a-real-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_and_failure_exit_codes() {
        let sh = SystemExecutable::new("sh");
        sh.execute(&Execution::new(["-c", "exit 0"])).unwrap();

        let err = sh.execute(&Execution::new(["-c", "exit 3"])).unwrap_err();
        match err {
            ExecError::Failed { program, args, code } => {
                assert_eq!(program, "sh");
                assert_eq!(args, "-c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sh = SystemExecutable::new("sh");
        sh.execute(&Execution::new(["-c", "touch marker"]).dir(dir.path()))
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }
}
