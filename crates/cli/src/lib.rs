pub mod artifact;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod exec;
pub mod init;
pub mod output;
pub mod tail;
pub mod verify;

pub use artifact::{ArtifactInfo, ReportStyle};
pub use cli::{CheckArgs, Cli, Command, InitArgs, OutputFormat};
pub use error::{Error, ExitCode, Result};
pub use exec::{CommandExecutor, ExecError, ExecOutput, Invocation, ShellExecutor};
pub use verify::{BuildPlan, Phase, Verdict, Verifier};
