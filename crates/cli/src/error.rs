use std::path::PathBuf;

/// Anneal error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External command could not be run
    #[error(transparent)]
    Exec(#[from] crate::exec::ExecError),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using anneal Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per CLI spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Build succeeded (and artifact confirmed when one was expected)
    Success = 0,
    /// Build failed, or artifact missing after a zero exit
    BuildFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Clean or build step exceeded its bounded wait time
    TimedOut = 3,
    /// Internal error
    InternalError = 4,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Exec(crate::exec::ExecError::TimedOut { .. }) => ExitCode::TimedOut,
            Error::Exec(_) => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
