//! Text output formatter.
//!
//! Verdict lines follow a `step: STATUS` shape:
//! ```text
//! build: FAIL (exit code 2)
//! stderr:
//! error: missing semicolon
//! ```
//! Captured streams are emitted verbatim, limited to the configured trailing
//! characters, with no truncation marker.

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::artifact::{ArtifactInfo, ReportStyle};
use crate::color::scheme;
use crate::tail;
use crate::verify::Verdict;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
    report: ReportStyle,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn stdout(color: ColorChoice, options: FormatOptions, report: ReportStyle) -> Self {
        Self::new(StandardStream::stdout(color), options, report)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    /// Create a formatter writing to an arbitrary colored stream.
    pub fn new(out: W, options: FormatOptions, report: ReportStyle) -> Self {
        Self {
            out,
            options,
            report,
        }
    }

    /// Write the verdict for one verification run.
    pub fn write_verdict(&mut self, verdict: &Verdict) -> std::io::Result<()> {
        match verdict {
            Verdict::Succeeded { build, artifact } => {
                self.write_status("build", &scheme::ok(), "OK")?;
                if self.options.verbose {
                    self.write_context(&format!("completed in {:?}", build.duration))?;
                }
                if let Some(info) = artifact {
                    self.write_artifact(info)?;
                }
            }
            Verdict::BuildFailed { build } => {
                self.write_status(
                    "build",
                    &scheme::fail(),
                    &format!("FAIL (exit code {})", build.exit_code),
                )?;
                self.write_stream("stdout", &build.stdout)?;
                self.write_stream("stderr", &build.stderr)?;
            }
            Verdict::ArtifactMissing { path, .. } => {
                self.write_status("build", &scheme::ok(), "OK")?;
                self.out.set_color(&scheme::step_name())?;
                write!(self.out, "artifact")?;
                self.out.reset()?;
                write!(self.out, ": ")?;
                self.out.set_color(&scheme::fail())?;
                write!(self.out, "MISSING")?;
                self.out.reset()?;
                write!(self.out, " (")?;
                self.out.set_color(&scheme::path())?;
                write!(self.out, "{}", path.display())?;
                self.out.reset()?;
                writeln!(self.out, ")")?;
            }
            Verdict::TimedOut { phase, timeout } => {
                self.write_status(phase.as_str(), &scheme::fail(), "TIMEOUT")?;
                self.write_context(&format!("{} step timed out after {:?}", phase, timeout))?;
            }
        }
        Ok(())
    }

    /// Write a `step: STATUS` line.
    fn write_status(
        &mut self,
        step: &str,
        spec: &termcolor::ColorSpec,
        status: &str,
    ) -> std::io::Result<()> {
        self.out.set_color(&scheme::step_name())?;
        write!(self.out, "{}", step)?;
        self.out.reset()?;
        write!(self.out, ": ")?;
        self.out.set_color(spec)?;
        write!(self.out, "{}", status)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    /// Write an indented context line.
    fn write_context(&mut self, text: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::dim())?;
        writeln!(self.out, "  {}", text)?;
        self.out.reset()
    }

    /// Write the artifact report per the configured style.
    fn write_artifact(&mut self, info: &ArtifactInfo) -> std::io::Result<()> {
        match self.report {
            ReportStyle::Size => {
                self.out.set_color(&scheme::step_name())?;
                write!(self.out, "artifact")?;
                self.out.reset()?;
                write!(self.out, ": ")?;
                self.out.set_color(&scheme::path())?;
                write!(self.out, "{}", info.path.display())?;
                self.out.reset()?;
                writeln!(self.out, " ({} bytes)", info.size)
            }
            ReportStyle::Listing => writeln!(self.out, "{}", info.listing),
        }
    }

    /// Write a captured stream section, tail-limited. Empty streams are skipped.
    fn write_stream(&mut self, label: &str, text: &str) -> std::io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let shown = match self.options.tail {
            Some(limit) => tail::tail(text, limit),
            None => text,
        };
        self.out.set_color(&scheme::dim())?;
        writeln!(self.out, "{}:", label)?;
        self.out.reset()?;
        writeln!(self.out, "{}", shown)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
