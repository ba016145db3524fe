//! JSON output formatter.
//!
//! One JSON object per run. Captured streams are included in full; the text
//! formatter's tail limit does not apply here.

use serde::Serialize;

use crate::artifact::ArtifactInfo;
use crate::exec::ExecOutput;
use crate::verify::Verdict;

/// Serialized form of one verification run.
#[derive(Serialize)]
pub struct JsonVerdict<'a> {
    /// "ok", "build-failed", "artifact-missing", or "timed-out".
    pub status: &'static str,
    /// Process exit code the run maps to.
    pub exit_code: u8,
    /// Build step result (absent when a step timed out).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<JsonStep<'a>>,
    /// Confirmed artifact metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<&'a ArtifactInfo>,
    /// Expected artifact path when it was not found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_artifact: Option<String>,
    /// Step that timed out ("clean" or "build").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timed_out_phase: Option<&'static str>,
    /// The expired bound, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Serialized form of one executed step.
#[derive(Serialize)]
pub struct JsonStep<'a> {
    pub exit_code: i32,
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub duration_ms: u64,
}

impl<'a> From<&'a ExecOutput> for JsonStep<'a> {
    fn from(out: &'a ExecOutput) -> Self {
        Self {
            exit_code: out.exit_code,
            stdout: &out.stdout,
            stderr: &out.stderr,
            duration_ms: out.duration.as_millis() as u64,
        }
    }
}

impl<'a> From<&'a Verdict> for JsonVerdict<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        let exit_code = verdict.exit_code() as u8;
        match verdict {
            Verdict::Succeeded { build, artifact } => Self {
                status: "ok",
                exit_code,
                build: Some(build.into()),
                artifact: artifact.as_ref(),
                missing_artifact: None,
                timed_out_phase: None,
                timeout_ms: None,
            },
            Verdict::BuildFailed { build } => Self {
                status: "build-failed",
                exit_code,
                build: Some(build.into()),
                artifact: None,
                missing_artifact: None,
                timed_out_phase: None,
                timeout_ms: None,
            },
            Verdict::ArtifactMissing { build, path } => Self {
                status: "artifact-missing",
                exit_code,
                build: Some(build.into()),
                artifact: None,
                missing_artifact: Some(path.display().to_string()),
                timed_out_phase: None,
                timeout_ms: None,
            },
            Verdict::TimedOut { phase, timeout } => Self {
                status: "timed-out",
                exit_code,
                build: None,
                artifact: None,
                missing_artifact: None,
                timed_out_phase: Some(phase.as_str()),
                timeout_ms: Some(timeout.as_millis() as u64),
            },
        }
    }
}

/// Render a verdict as a pretty-printed JSON object.
pub fn render(verdict: &Verdict) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonVerdict::from(verdict))
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
