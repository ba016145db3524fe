// SPDX-License-Identifier: MIT

//! External process invocation with bounded timeouts.
//!
//! The verifier never waits on a child indefinitely by default: each step
//! carries a bounded wait time, and an expired wait kills the child.
//! Execution sits behind [`CommandExecutor`] so tests can drive the verifier
//! without spawning real processes.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// A single external command invocation.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    /// Shell command line to run.
    pub command: &'a str,
    /// Working directory for the child process.
    pub dir: &'a Path,
    /// Bounded wait time (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

/// Captured result of one completed invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Exit code (-1 if terminated by a signal).
    pub exit_code: i32,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

impl ExecOutput {
    /// Whether the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Why an invocation produced no usable output.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The bounded wait time elapsed; the child was killed.
    #[error("`{command}` timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// The shell itself could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// I/O failure while waiting on the child.
    #[error("failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Seam for running external commands.
///
/// The production implementation is [`ShellExecutor`]; tests substitute a
/// fake that returns canned outputs.
pub trait CommandExecutor {
    /// Run a command with a bounded wait, capturing both streams.
    fn run(&self, inv: &Invocation) -> Result<ExecOutput, ExecError>;
}

/// Executor that runs commands through the platform shell.
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn run(&self, inv: &Invocation) -> Result<ExecOutput, ExecError> {
        let start = Instant::now();

        let mut cmd = shell_command(inv.command);
        cmd.current_dir(inv.dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| ExecError::Spawn {
            command: inv.command.to_string(),
            source: e,
        })?;

        let output = match run_with_timeout(child, inv.timeout) {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                return Err(ExecError::TimedOut {
                    command: inv.command.to_string(),
                    timeout: inv.timeout.unwrap_or_default(),
                });
            }
            Err(e) => {
                return Err(ExecError::Io {
                    command: inv.command.to_string(),
                    source: e,
                });
            }
        };

        Ok(ExecOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        })
    }
}

/// Build a shell command for the current platform.
fn shell_command(command: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

/// Run a child process with an optional timeout.
///
/// If timeout is None, waits indefinitely.
/// If timeout expires, kills the process and returns a TimedOut error.
///
/// Both pipes are drained on background threads from the moment the child
/// starts: a child that writes more than the OS pipe buffer holds must not
/// block on a full pipe while we poll for its exit.
pub fn run_with_timeout(mut child: Child, timeout: Option<Duration>) -> io::Result<Output> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(t) => {
            let start = Instant::now();
            let poll_interval = Duration::from_millis(50);

            loop {
                match child.try_wait()? {
                    Some(status) => break status,
                    None => {
                        if start.elapsed() > t {
                            child.kill().ok();
                            child.wait().ok();
                            return Err(io::Error::new(
                                io::ErrorKind::TimedOut,
                                format!("command timed out after {:?}", t),
                            ));
                        }
                        std::thread::sleep(poll_interval);
                    }
                }
            }
        }
        None => child.wait()?,
    };

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Read a pipe to EOF on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<thread::JoinHandle<Vec<u8>>> {
    pipe.map(|mut r| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn collect(reader: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
