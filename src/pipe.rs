//! Pipes a fixed command into the Cube interpreter.

use anyhow::{Context, Result};
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Interpreter binary spawned by default.
pub const DEFAULT_PROGRAM: &str = "/usr/local/bin/cube";

/// Working directory of the spawned interpreter.
pub const DEFAULT_WORKING_DIR: &str = "/tmp";

/// Command written to the interpreter's standard input.
pub const DEFAULT_INPUT: &str = "ls();";

/// Interpreter invocation with all three standard streams piped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubePipe {
    pub program: PathBuf,
    pub working_dir: PathBuf,
    pub input: String,
}

impl Default for CubePipe {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            input: DEFAULT_INPUT.to_string(),
        }
    }
}

/// Captured interpreter run.
///
/// Standard output is kept as raw bytes; the interpreter may print file
/// names that are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeOutput {
    pub stdout: Vec<u8>,
    pub status: ExitStatus,
}

impl PipeOutput {
    /// Exit code of the interpreter, `-1` when it was killed by a signal.
    pub fn return_value(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

impl CubePipe {
    /// Runs the interpreter and collects its standard output.
    ///
    /// Standard input is closed after the command is written. Standard error
    /// is drained and discarded on a separate thread so a chatty interpreter
    /// cannot block on a full pipe while stdout is read.
    ///
    /// # Errors
    ///
    /// Returns error if the interpreter cannot be spawned or a pipe fails.
    pub fn run(&self) -> Result<PipeOutput> {
        let mut child = Command::new(&self.program)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.program.display()))?;

        tracing::debug!(program = %self.program.display(), pid = child.id(), "spawned interpreter");

        let mut stderr = child.stderr.take().context("Interpreter stderr not piped")?;
        let stderr_drain = thread::spawn(move || io::copy(&mut stderr, &mut io::sink()));

        {
            let mut stdin = child.stdin.take().context("Interpreter stdin not piped")?;
            match stdin.write_all(self.input.as_bytes()) {
                Ok(()) => {}
                // Interpreter exited without reading its input.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("interpreter closed stdin early");
                }
                Err(e) => return Err(e).context("Failed to write command to interpreter"),
            }
        }

        let mut stdout = Vec::new();
        child
            .stdout
            .take()
            .context("Interpreter stdout not piped")?
            .read_to_end(&mut stdout)
            .context("Failed to read interpreter output")?;

        match stderr_drain.join() {
            Ok(Ok(discarded)) => tracing::debug!(bytes = discarded, "discarded interpreter stderr"),
            Ok(Err(e)) => tracing::debug!(error = %e, "interpreter stderr read failed"),
            Err(_) => tracing::debug!("stderr drain thread panicked"),
        }

        let status = child.wait().context("Failed to wait for interpreter")?;
        tracing::debug!(?status, bytes = stdout.len(), "interpreter exited");

        Ok(PipeOutput { stdout, status })
    }
}
