//! Process runner: spawn one tool and capture its combined output.

use std::io::{self, Read, Seek};
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Lines a tool printed on stdout and stderr, interleaved as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub lines: Vec<String>,
}

impl CapturedOutput {
    pub fn new(exit_code: Option<i32>, lines: Vec<String>) -> Self {
        Self { exit_code, lines }
    }

    pub fn from_text(exit_code: Option<i32>, text: &str) -> Self {
        Self::new(exit_code, text.lines().map(str::to_string).collect())
    }
}

/// Error running an external command.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("empty command")]
    EmptyCommand,
    #[error("cannot execute {program} (no such file)")]
    NotFound { program: String },
    #[error("cannot execute {program} (permission denied)")]
    PermissionDenied { program: String },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to capture output: {0}")]
    Capture(#[from] io::Error),
}

impl RunError {
    fn spawn(program: &str, source: io::Error) -> Self {
        let program = program.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => RunError::NotFound { program },
            io::ErrorKind::PermissionDenied => RunError::PermissionDenied { program },
            _ => RunError::Spawn { program, source },
        }
    }
}

/// Runs a command to completion and hands back its output lines.
///
/// A non-zero exit status is not an error: linters exit non-zero
/// precisely when they have something to report.
pub trait CommandRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<CapturedOutput, RunError>;
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<CapturedOutput, RunError> {
        let (program, args) = argv.split_first().ok_or(RunError::EmptyCommand)?;

        // Deleted on drop, on every path out of this function.
        let mut scratch = tempfile::tempfile()?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(scratch.try_clone()?))
            .stderr(Stdio::from(scratch.try_clone()?));
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        log::debug!("running {}", argv.join(" "));
        let status = command
            .spawn()
            .and_then(|mut child| child.wait())
            .map_err(|e| RunError::spawn(program, e))?;
        // Release the builder's duplicates of the scratch handle.
        drop(command);

        scratch.rewind()?;
        let mut bytes = Vec::new();
        scratch.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes);

        log::debug!(
            "{} exited with {:?}, {} bytes of output",
            program,
            status.code(),
            bytes.len()
        );
        Ok(CapturedOutput::from_text(status.code(), &text))
    }
}
