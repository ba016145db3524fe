// SPDX-License-Identifier: MIT

//! The build verifier: clean, then build, then inspect.
//!
//! Steps run strictly in sequence. The clean step's exit status is ignored
//! (a stale tree is allowed to fail to clean) but its timeout is not. The
//! build verdict comes from the build step's exit code, and when an artifact
//! path is configured its presence is checked independently of that exit
//! code: a zero exit alone never proves the binary exists.

use std::path::PathBuf;
use std::time::Duration;

use crate::artifact::{self, ArtifactInfo};
use crate::error::{ExitCode, Result};
use crate::exec::{CommandExecutor, ExecError, ExecOutput, Invocation};

/// What to run and what to expect.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Directory the commands run in.
    pub project_dir: PathBuf,
    /// Clean command (None disables the step).
    pub clean: Option<String>,
    /// Build command.
    pub build: String,
    /// Bounded wait for the clean step.
    pub clean_timeout: Option<Duration>,
    /// Bounded wait for the build step.
    pub build_timeout: Option<Duration>,
    /// Expected artifact, relative to the project directory.
    pub artifact: Option<PathBuf>,
}

/// Which external step was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Clean,
    Build,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Clean => "clean",
            Phase::Build => "build",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one verification run.
#[derive(Debug)]
pub enum Verdict {
    /// Build exited zero; artifact confirmed when one was expected.
    Succeeded {
        build: ExecOutput,
        artifact: Option<ArtifactInfo>,
    },
    /// Build exited nonzero.
    BuildFailed { build: ExecOutput },
    /// Build exited zero but the expected artifact is absent.
    ArtifactMissing { build: ExecOutput, path: PathBuf },
    /// The clean or build step exceeded its bounded wait time.
    TimedOut { phase: Phase, timeout: Duration },
}

impl Verdict {
    /// Whether the verification passed.
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Succeeded { .. })
    }

    /// Process exit code this verdict maps to.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Verdict::Succeeded { .. } => ExitCode::Success,
            Verdict::BuildFailed { .. } | Verdict::ArtifactMissing { .. } => ExitCode::BuildFailed,
            Verdict::TimedOut { .. } => ExitCode::TimedOut,
        }
    }
}

/// Drives a build plan to a verdict through a [`CommandExecutor`].
pub struct Verifier<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> Verifier<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Run the clean-then-build sequence and classify the result.
    ///
    /// Returns `Err` only for failures outside the verdict taxonomy
    /// (spawn errors, artifact metadata I/O).
    pub fn run(&self, plan: &BuildPlan) -> Result<Verdict> {
        if let Some(clean) = &plan.clean
            && let Some(verdict) = self.run_clean(plan, clean)?
        {
            return Ok(verdict);
        }

        tracing::debug!(command = %plan.build, "running build step");
        let build = match self.executor.run(&Invocation {
            command: &plan.build,
            dir: &plan.project_dir,
            timeout: plan.build_timeout,
        }) {
            Ok(out) => out,
            Err(ExecError::TimedOut { timeout, .. }) => {
                return Ok(Verdict::TimedOut {
                    phase: Phase::Build,
                    timeout,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            exit_code = build.exit_code,
            duration_ms = build.duration.as_millis() as u64,
            "build step finished"
        );

        if !build.success() {
            return Ok(Verdict::BuildFailed { build });
        }

        match &plan.artifact {
            Some(rel) => {
                let path = plan.project_dir.join(rel);
                match artifact::inspect(&path)? {
                    Some(info) => Ok(Verdict::Succeeded {
                        build,
                        artifact: Some(info),
                    }),
                    None => Ok(Verdict::ArtifactMissing { build, path }),
                }
            }
            None => Ok(Verdict::Succeeded {
                build,
                artifact: None,
            }),
        }
    }

    /// Run the clean step. Returns a verdict only when the step times out.
    fn run_clean(&self, plan: &BuildPlan, clean: &str) -> Result<Option<Verdict>> {
        tracing::debug!(command = %clean, "running clean step");
        match self.executor.run(&Invocation {
            command: clean,
            dir: &plan.project_dir,
            timeout: plan.clean_timeout,
        }) {
            Ok(out) => {
                if !out.success() {
                    tracing::debug!(exit_code = out.exit_code, "clean step failed (ignored)");
                }
                Ok(None)
            }
            Err(ExecError::TimedOut { timeout, .. }) => Ok(Some(Verdict::TimedOut {
                phase: Phase::Clean,
                timeout,
            })),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
